use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Body returned by every successful DELETE.
#[derive(Serialize, Debug)]
pub struct Deleted {
    pub status: bool,
    pub message: String,
}

impl Deleted {
    pub fn new(entity: &str) -> Self {
        Self { status: true, message: format!("The {} has been deleted", entity) }
    }
}
