// Help Center endpoints
//
// Knowledge-base resources live under `help_center/` relative to the
// same API root, so they ride the same dispatch pipeline (and the same
// cache) as the core resources.

use serde_json::Value;

use crate::client::Client;
use crate::error::Error;
use crate::request::Params;

impl Client {
    /// List knowledge-base categories for a locale.
    pub async fn list_categories(&self, locale: &str) -> Result<Value, Error> {
        self.get(&format!("help_center/{locale}/categories"), Params::new())
            .await
    }

    /// List sections within a category.
    pub async fn list_sections(&self, category_id: u64, locale: &str) -> Result<Value, Error> {
        self.get(
            &format!("help_center/{locale}/categories/{category_id}/sections"),
            Params::new(),
        )
        .await
    }

    /// List all articles for a locale.
    pub async fn list_articles(&self, locale: &str) -> Result<Value, Error> {
        self.get(&format!("help_center/{locale}/articles"), Params::new())
            .await
    }

    /// Articles within a category.
    pub async fn list_category_articles(
        &self,
        category_id: u64,
        locale: &str,
    ) -> Result<Value, Error> {
        self.get(
            &format!("help_center/{locale}/categories/{category_id}/articles"),
            Params::new(),
        )
        .await
    }

    /// Articles within a section.
    pub async fn list_section_articles(
        &self,
        section_id: u64,
        locale: &str,
    ) -> Result<Value, Error> {
        self.get(
            &format!("help_center/{locale}/sections/{section_id}/articles"),
            Params::new(),
        )
        .await
    }

    /// Articles carrying all of the given labels.
    pub async fn articles_by_label(&self, labels: &[&str]) -> Result<Value, Error> {
        if labels.is_empty() {
            return Err(Error::InvalidArgument(
                "at least one label is required".into(),
            ));
        }
        let mut params = Params::new();
        params.insert("label_names".into(), labels.join(",").into());
        self.get("help_center/articles", params).await
    }
}
