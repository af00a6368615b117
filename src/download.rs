use std::future::Future;
use std::path::{Path, PathBuf};

use indicatif::ProgressBar;

use crate::error::{Error, Result};
use crate::query::{BoardType, SearchFilter};
use crate::timestamp::Timestamp;

/// Body the server returns for a page past the end of the result set.
pub const EMPTY_RESULT_SENTINEL: &[u8] = b"% PBN 2.1";

/// Anything that can fetch one page of boards for a filter.
pub trait PageSource {
    fn fetch_page(&self, filter: &SearchFilter) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// Whether a page body signals that there are no more boards.
///
/// Surrounding whitespace is ASCII whitespace as defined by `trim_ascii`, which
/// does not include vertical tab (`\x0b`).
pub fn is_exhausted(content: &[u8]) -> bool {
    content.is_empty() || content.trim_ascii() == EMPTY_RESULT_SENTINEL
}

pub fn page_file_name(nickname: &str, page: u32) -> String {
    format!("{nickname}_boards_page_{page}.pbn")
}

/// The nickname becomes part of every page's file name, so it must not be able
/// to leave the output directory.
fn check_nickname(nickname: &str) -> Result<()> {
    if nickname.contains(['/', '\\', '\0']) {
        return Err(Error::InvalidNickname {
            nickname: nickname.to_string(),
        });
    }
    Ok(())
}

/// Fixed inputs of one bulk download
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub nickname: String,
    pub output_dir: PathBuf,
    pub board_type: Option<BoardType>,
    pub created_from: Option<Timestamp>,
    pub created_to: Option<Timestamp>,
    pub page_size: u32,
}

impl DownloadRequest {
    fn filter_for(&self, page: u32) -> SearchFilter {
        SearchFilter {
            nickname: Some(self.nickname.clone()),
            board_type: self.board_type,
            created_from: self.created_from,
            created_to: self.created_to,
            page,
            page_size: self.page_size,
        }
    }
}

/// Why the download loop stopped
#[derive(Debug)]
pub enum StopReason {
    /// The server returned an empty page.
    Exhausted,
    /// Fetching `page` failed. Pages before it were saved.
    Interrupted { page: u32, error: Error },
}

#[derive(Debug)]
pub struct DownloadSummary {
    pub files_written: u32,
    /// Paths of the saved pages, in page order.
    pub pages: Vec<PathBuf>,
    pub stop: StopReason,
}

enum FetchOutcome {
    Page(Vec<u8>),
    Exhausted,
    Failed(Error),
}

async fn fetch<S: PageSource>(source: &S, filter: &SearchFilter) -> Result<FetchOutcome> {
    match source.fetch_page(filter).await {
        Ok(content) if is_exhausted(&content) => Ok(FetchOutcome::Exhausted),
        Ok(content) => Ok(FetchOutcome::Page(content)),
        Err(e) if e.is_transient() => Ok(FetchOutcome::Failed(e)),
        Err(e) => Err(e),
    }
}

/// Download every page for `request.nickname` into `request.output_dir`.
///
/// Pages are fetched one at a time starting at 1 and saved as
/// `{nickname}_boards_page_{page}.pbn`, replacing existing files. The loop ends
/// on the first empty page or the first failed request; a failed request is not
/// an error here and shows up as [`StopReason::Interrupted`] in the summary.
/// Failing to create the output directory or to write a page is an error, as
/// are a nickname containing a path separator and any non-transient error from
/// `source`.
pub async fn download_all_boards<S: PageSource>(
    source: &S,
    request: &DownloadRequest,
    pb: &ProgressBar,
) -> Result<DownloadSummary> {
    check_nickname(&request.nickname)?;

    tokio::fs::create_dir_all(&request.output_dir)
        .await
        .map_err(|e| Error::filesystem(&request.output_dir, e))?;

    let mut page = 1;
    let mut files_written = 0;
    let mut pages = Vec::new();

    let stop = loop {
        pb.set_message(format!(
            "{}: page {page} ({files_written} saved)",
            request.nickname
        ));

        let content = match fetch(source, &request.filter_for(page)).await? {
            FetchOutcome::Page(content) => content,
            FetchOutcome::Exhausted => {
                tracing::info!("page {page} is empty, no more boards");
                break StopReason::Exhausted;
            }
            FetchOutcome::Failed(error) => {
                tracing::warn!("fetching page {page} failed, stopping: {error}");
                break StopReason::Interrupted { page, error };
            }
        };

        let path = save_page(
            &request.output_dir,
            &page_file_name(&request.nickname, page),
            &content,
        )
        .await?;
        tracing::info!("saved page {page} to {}", path.display());

        pages.push(path);
        files_written += 1;
        pb.inc(1);
        page += 1;
    };

    pb.finish_with_message(format!(
        "{}: {files_written} pages saved",
        request.nickname
    ));

    Ok(DownloadSummary {
        files_written,
        pages,
        stop,
    })
}

async fn save_page(output_dir: &Path, filename: &str, content: &[u8]) -> Result<PathBuf> {
    let dest = output_dir.join(filename);
    let tmp = output_dir.join(format!(".{filename}.tmp"));

    if let Err(e) = tokio::fs::write(&tmp, content).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(Error::filesystem(&tmp, e));
    }
    if let Err(e) = tokio::fs::rename(&tmp, &dest).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(Error::filesystem(&dest, e));
    }

    Ok(dest)
}
