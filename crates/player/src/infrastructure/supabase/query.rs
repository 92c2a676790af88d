//! PostgREST query-string builder for the `/rest/v1` table API.

use std::fmt::Display;

use url::Url;

/// A read or filter against one table.
///
/// Parameters keep insertion order so the produced URLs are stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    table: String,
    params: Vec<(String, String)>,
}

impl TableQuery {
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            params: Vec::new(),
        }
    }

    pub fn select(self, columns: &str) -> Self {
        self.param("select", columns)
    }

    /// `column = value`
    pub fn eq(self, column: &str, value: impl Display) -> Self {
        self.param(column, format!("eq.{}", value))
    }

    /// `column <= value`; rows where the column is null never match.
    pub fn lte(self, column: &str, value: impl Display) -> Self {
        self.param(column, format!("lte.{}", value))
    }

    /// Newest first by `column`
    pub fn order_desc(self, column: &str) -> Self {
        self.param("order", format!("{}.desc", column))
    }

    fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.push((key.to_string(), value.into()));
        self
    }

    /// Absolute URL under `base_url`.
    pub fn url(&self, base_url: &str) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&format!(
            "{}/rest/v1/{}",
            base_url.trim_end_matches('/'),
            self.table
        ))?;
        if !self.params.is_empty() {
            url.query_pairs_mut().extend_pairs(self.params.iter());
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(url: &Url) -> Vec<(String, String)> {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn builds_unlocked_lore_query() {
        let url = TableQuery::table("lore")
            .select("id,title,summary,kind,tags,unlock_session")
            .eq("visibility", "public")
            .lte("unlock_session", 3)
            .order_desc("created_at")
            .url("https://proj.example.co/")
            .unwrap();

        assert_eq!(url.path(), "/rest/v1/lore");
        assert_eq!(
            pairs(&url),
            vec![
                ("select".into(), "id,title,summary,kind,tags,unlock_session".into()),
                ("visibility".into(), "eq.public".into()),
                ("unlock_session".into(), "lte.3".into()),
                ("order".into(), "created_at.desc".into()),
            ]
        );
    }

    #[test]
    fn bare_table_has_no_query() {
        let url = TableQuery::table("lore").url("http://localhost:54321").unwrap();
        assert_eq!(url.as_str(), "http://localhost:54321/rest/v1/lore");
    }

    #[test]
    fn rejects_bad_base_url() {
        assert!(TableQuery::table("lore").url("not a url").is_err());
    }
}
