use serde_json::Value;

/// The cursor for the next page of a paginated response, if there is one.
///
/// Slack signals the last page with a missing `response_metadata` or an empty
/// `next_cursor`, both are treated the same.
#[must_use]
pub fn next_cursor(page: &Value) -> Option<&str> {
    page.get("response_metadata")
        .and_then(|metadata| metadata.get("next_cursor"))
        .and_then(Value::as_str)
        .filter(|cursor| !cursor.is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reads_next_cursor() {
        let page = json!({
            "ok": true,
            "channels": [],
            "response_metadata": { "next_cursor": "dGVhbTpDMDYxRkE1UEI=" }
        });

        assert_eq!(next_cursor(&page), Some("dGVhbTpDMDYxRkE1UEI="));
    }

    #[test]
    fn last_page_has_no_cursor() {
        for page in [
            json!({ "ok": true }),
            json!({ "ok": true, "response_metadata": {} }),
            json!({ "ok": true, "response_metadata": { "next_cursor": "" } }),
            json!({ "ok": true, "response_metadata": { "next_cursor": null } }),
        ] {
            assert_eq!(next_cursor(&page), None, "{page}");
        }
    }
}
