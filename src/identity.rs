use k8s_openapi::api::authentication::v1::UserInfo;
use tracing::info;

/// Username prefix marking a ServiceAccount principal
const SERVICE_ACCOUNT_PREFIX: &str = "system:serviceaccount:";

/// A ServiceAccount identity parsed out of an admission request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceAccountRef {
    pub namespace: String,
    pub name: String,
}

/// Extracts the requesting ServiceAccount from an admission request's user info
///
/// ServiceAccount usernames have the form
/// `system:serviceaccount:<namespace>:<name>`. Returns `None` for any other
/// principal (human users, node identities) and for malformed usernames that
/// carry the prefix but do not split into exactly four segments.
pub fn service_account(user_info: &UserInfo) -> Option<ServiceAccountRef> {
    let username = user_info.username.as_deref()?;
    if !username.starts_with(SERVICE_ACCOUNT_PREFIX) {
        return None;
    }

    let parts: Vec<&str> = username.split(':').collect();
    if parts.len() != 4 {
        return None;
    }

    let (namespace, name) = (parts[2], parts[3]);
    info!(
        service_account = %name,
        namespace = %namespace,
        "request made by service account"
    );

    Some(ServiceAccountRef {
        namespace: namespace.to_owned(),
        name: name.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(username: Option<&str>) -> UserInfo {
        UserInfo {
            username: username.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_extracts_name_and_namespace() {
        let sa = service_account(&user(Some("system:serviceaccount:build:build-bot"))).unwrap();
        assert_eq!(sa.namespace, "build");
        assert_eq!(sa.name, "build-bot");
    }

    #[test]
    fn test_human_user_is_absent() {
        assert_eq!(service_account(&user(Some("jane@example.com"))), None);
    }

    #[test]
    fn test_node_identity_is_absent() {
        assert_eq!(service_account(&user(Some("system:node:worker-1"))), None);
    }

    #[test]
    fn test_missing_username_is_absent() {
        assert_eq!(service_account(&user(None)), None);
    }

    #[test]
    fn test_too_few_segments_is_absent() {
        assert_eq!(service_account(&user(Some("system:serviceaccount:only-ns"))), None);
    }

    #[test]
    fn test_too_many_segments_is_absent() {
        assert_eq!(
            service_account(&user(Some("system:serviceaccount:ns:name:extra"))),
            None
        );
    }
}
