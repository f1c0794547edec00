pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
        assert_eq!(serde_json::to_value(&h).unwrap()["status"], "ok");
    }

    #[test]
    fn deleted_message_shape() {
        let d = types::Deleted::new("menu");
        let v = serde_json::to_value(&d).unwrap();
        assert_eq!(v["status"], true);
        assert_eq!(v["message"], "The menu has been deleted");
    }
}
