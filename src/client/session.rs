//! Admin session: the UI's list and form state driven through [`AdminClient`].

use super::{AdminClient, ApiReply, ClientError, Credential, Notice};
use crate::models::blog::{BlogPost, Category};

/// Image attached to a draft.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// The create form.
///
/// The initial state has no category selected; `reset` returns to exactly
/// that state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlogDraft {
    pub title: String,
    pub sub_title: String,
    pub description: String,
    pub category: Option<Category>,
    pub is_published: bool,
    pub image: Option<ImageFile>,
}

impl BlogDraft {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// An authenticated admin session with its local copy of the blog list.
///
/// Local state changes only after the server reports success.
pub struct AdminSession {
    client: AdminClient,
    credential: Credential,
    blogs: Vec<BlogPost>,
}

impl AdminSession {
    pub fn new(client: AdminClient, credential: Credential) -> Self {
        Self {
            client,
            credential,
            blogs: Vec::new(),
        }
    }

    /// Log in and load the initial list.
    pub async fn login(client: AdminClient, email: &str, password: &str) -> Result<Self, ClientError> {
        let credential = client.login(email, password).await?;
        let mut session = Self::new(client, credential);
        session.refresh().await?;
        Ok(session)
    }

    pub fn blogs(&self) -> &[BlogPost] {
        &self.blogs
    }

    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        self.blogs = self.client.list_blogs(&self.credential).await?;
        Ok(())
    }

    /// Turn an outcome into a notice, refreshing the list after a success.
    async fn settle(&mut self, outcome: Result<ApiReply, ClientError>) -> Notice {
        let notice = Notice::from_outcome(&outcome);
        if notice.is_success() {
            if let Err(e) = self.refresh().await {
                tracing::warn!("Failed to refresh blog list: {}", e);
            }
        }
        notice
    }

    /// Submit the draft. It is cleared only when the server accepts it.
    pub async fn submit(&mut self, draft: &mut BlogDraft) -> Notice {
        let outcome = self.client.add_blog(&self.credential, draft).await;
        let notice = self.settle(outcome).await;
        if notice.is_success() {
            draft.reset();
        }
        notice
    }

    pub async fn toggle_publish(&mut self, id: &str) -> Notice {
        let outcome = self.client.toggle_publish(&self.credential, id).await;
        self.settle(outcome).await
    }

    pub async fn delete(&mut self, id: &str) -> Notice {
        let outcome = self.client.delete_blog(&self.credential, id).await;
        self.settle(outcome).await
    }

    /// Fill the draft description from its title.
    ///
    /// A blank title is refused locally without contacting the server.
    pub async fn generate(&self, draft: &mut BlogDraft) -> Notice {
        if draft.title.trim().is_empty() {
            return Notice::Error("Please enter the title".to_string());
        }

        let outcome = self
            .client
            .generate_content(&self.credential, &draft.title)
            .await;

        Self::apply_generated(draft, outcome)
    }

    /// Only a successful reply that carries content touches the draft.
    fn apply_generated(draft: &mut BlogDraft, outcome: Result<ApiReply, ClientError>) -> Notice {
        match outcome {
            Ok(ApiReply {
                success: true,
                content: Some(content),
                ..
            }) => {
                draft.description = content;
                Notice::Success("Content generated".to_string())
            }
            Ok(ApiReply { success: true, .. }) => {
                Notice::Error("No content was generated".to_string())
            }
            other => Notice::from_outcome(&other),
        }
    }
}
