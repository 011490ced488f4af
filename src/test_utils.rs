use crate::models::domain::SourceDocument;

#[cfg(test)]
pub mod fixtures {
    use super::*;

    pub const OWNER_ID: &str = "uid-owner";
    pub const OTHER_USER_ID: &str = "uid-intruder";
    pub const DOCUMENT_ID: &str = "reviewer-1";

    pub const TWO_MULTIPLE_CHOICE: &str = "Q: Which layer do routers operate at?\n\
        A) Physical\nB) Data link\nC) Network\nD) Transport\nCorrect: C\n\n\
        Q: Which protocol resolves MAC addresses?\n\
        A) ARP\nB) DNS\nC) DHCP\nD) ICMP\nCorrect: A";

    /// A stored reviewer owned by `OWNER_ID`.
    pub fn test_document() -> SourceDocument {
        SourceDocument {
            id: DOCUMENT_ID.to_string(),
            user_id: OWNER_ID.to_string(),
            title: "networks.pdf".to_string(),
            text_extracted: "Routers forward packets between networks. ARP maps IP to MAC."
                .to_string(),
            created_at: None,
        }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixture_document_is_owned_by_owner() {
        let doc = test_document();
        assert!(doc.is_owned_by(OWNER_ID));
        assert!(!doc.is_owned_by(OTHER_USER_ID));
    }
}
