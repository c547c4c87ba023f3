use log::{debug, error};
use serde::Deserialize;
use url::Url;

use crate::source::ActionInvoker;
use crate::{DirectoryError, Result, SHAREPOINT_LINK_ACTION};

const DEFAULT_FAILURE: &str = "unable to obtain the decisions folder link";

/// Reply of the `get-sharepoint-link` action.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkReply {
    pub success: bool,
    #[serde(default, rename = "decisoesFolderUrl")]
    pub folder_url: Option<String>,
    #[serde(default)]
    pub drive_name: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Location of the shared decisions folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePointLink {
    pub folder_url: Url,
    pub drive_name: Option<String>,
}

impl TryFrom<LinkReply> for SharePointLink {
    type Error = DirectoryError;

    fn try_from(reply: LinkReply) -> Result<Self> {
        if !reply.success {
            let message = reply
                .error
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_FAILURE.to_string());
            return Err(DirectoryError::Action(message));
        }

        let folder_url = reply
            .folder_url
            .ok_or_else(|| DirectoryError::Action(DEFAULT_FAILURE.to_string()))?;

        Ok(Self {
            folder_url: Url::parse(&folder_url)?,
            drive_name: reply.drive_name,
        })
    }
}

/// Ask the backend where the decisions folder lives.
///
/// Every failure is logged before being handed back, so callers only
/// have to decide how to tell the user.
pub async fn resolve_link(invoker: &dyn ActionInvoker) -> Result<SharePointLink> {
    let resolved = request_link(invoker).await;
    match &resolved {
        Ok(link) => debug!("Decisions folder at {}", link.folder_url),
        Err(err) => error!("Error fetching SharePoint link: {}", err),
    }
    resolved
}

async fn request_link(invoker: &dyn ActionInvoker) -> Result<SharePointLink> {
    let data = invoker
        .invoke(SHAREPOINT_LINK_ACTION, serde_json::json!({}))
        .await?
        .into_result()?;
    let reply: LinkReply = serde_json::from_value(data)?;
    SharePointLink::try_from(reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{ErrorDescriptor, Response};
    use async_trait::async_trait;
    use rstest::rstest;
    use serde_json::{json, Value};

    struct FixedInvoker(Response<Value>);

    #[async_trait]
    impl ActionInvoker for FixedInvoker {
        async fn invoke(
            &self,
            action: &str,
            body: Value,
        ) -> Result<Response<Value>> {
            assert_eq!(action, "get-sharepoint-link");
            assert_eq!(body, json!({}));
            Ok(self.0.clone())
        }
    }

    #[test_log::test(tokio::test)]
    async fn test_resolved_link() {
        let invoker = FixedInvoker(Response::ok(json!({
            "success": true,
            "decisoesFolderUrl": "https://tenant.sharepoint.com/sites/board/Decisoes",
            "driveName": "Documentos",
        })));

        let link = resolve_link(&invoker).await.unwrap();
        assert_eq!(
            link.folder_url.as_str(),
            "https://tenant.sharepoint.com/sites/board/Decisoes"
        );
        assert_eq!(link.drive_name.as_deref(), Some("Documentos"));
    }

    #[rstest]
    #[case(json!({"success": false, "error": "drive not found"}), "drive not found")]
    #[case(json!({"success": false}), DEFAULT_FAILURE)]
    #[case(json!({"success": false, "error": " "}), DEFAULT_FAILURE)]
    #[case(json!({"success": true}), DEFAULT_FAILURE)]
    fn test_action_failures(#[case] data: Value, #[case] expected: &str) {
        let reply: LinkReply = serde_json::from_value(data).unwrap();
        match SharePointLink::try_from(reply) {
            Err(DirectoryError::Action(message)) => assert_eq!(message, expected),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test_log::test(tokio::test)]
    async fn test_invalid_url() {
        let invoker = FixedInvoker(Response::ok(json!({
            "success": true,
            "decisoesFolderUrl": "not a url",
        })));

        assert!(matches!(
            resolve_link(&invoker).await,
            Err(DirectoryError::Url(_))
        ));
    }

    #[test_log::test(tokio::test)]
    async fn test_invocation_error() {
        let invoker = FixedInvoker(Response::err(ErrorDescriptor::new(
            "Edge Function returned a non-2xx status code",
        )));

        let err = resolve_link(&invoker).await.unwrap_err();
        assert!(err.is_source_error());
    }

    #[test_log::test(tokio::test)]
    async fn test_reply_of_wrong_shape() {
        let invoker = FixedInvoker(Response::ok(json!(["success"])));

        assert!(matches!(
            resolve_link(&invoker).await,
            Err(DirectoryError::Parse(_))
        ));
    }
}
