use std::fmt;

use url::Url;

use crate::error::{Error, Result};
use crate::timestamp::Timestamp;

/// Board category filter accepted by the `/boards` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BoardType {
    Ranked,
    #[value(name = "daily_tournament")]
    DailyTournament,
}

impl BoardType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ranked => "ranked",
            Self::DailyTournament => "daily_tournament",
        }
    }
}

impl fmt::Display for BoardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter and paging parameters for one `/boards` request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    pub nickname: Option<String>,
    pub board_type: Option<BoardType>,
    pub created_from: Option<Timestamp>,
    pub created_to: Option<Timestamp>,
    pub page: u32,
    pub page_size: u32,
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self {
            nickname: None,
            board_type: None,
            created_from: None,
            created_to: None,
            page: 1,
            page_size: 100,
        }
    }
}

impl SearchFilter {
    /// Query pairs in their wire order. Absent filters produce no pair at all.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(6);

        if let Some(nickname) = self.nickname.as_deref()
            && !nickname.is_empty()
        {
            pairs.push(("nickname", nickname.to_string()));
        }
        if let Some(board_type) = self.board_type {
            pairs.push(("boardType", board_type.to_string()));
        }
        if let Some(from) = self.created_from {
            pairs.push(("createdFrom", from.to_string()));
        }
        if let Some(to) = self.created_to {
            pairs.push(("createdTo", to.to_string()));
        }
        pairs.push(("page", self.page.to_string()));
        pairs.push(("pageSize", self.page_size.to_string()));

        pairs
    }
}

/// Resolve the `/boards` endpoint under a base URL such as
/// `https://api.example.com/v1/`. Trailing slashes on the base are ignored.
pub fn boards_endpoint(base_url: &str) -> Result<Url> {
    let trimmed = base_url.trim().trim_end_matches('/');
    Url::parse(&format!("{trimmed}/boards")).map_err(|source| Error::InvalidBaseUrl {
        url: base_url.to_string(),
        source,
    })
}

/// Build the full request URL for `filter`. Values are form-urlencoded.
pub fn search_url(endpoint: &Url, filter: &SearchFilter) -> Url {
    let mut url = endpoint.clone();
    url.query_pairs_mut().extend_pairs(filter.query_pairs());
    url
}
