//! Best-effort mirroring of canvas Markdown into Logseq pages.
//!
//! Each synced canvas gets one page file under the Logseq pages
//! directory, named with the `canvas___` prefix so the pages group under
//! a `canvas/` namespace inside Logseq. The page has three regions:
//!
//! ```text
//! type:: canvas                      page properties, rewritten dates
//! canvas-id:: <id>
//! updated:: 2026-08-30
//! source:: ai-canvas
//!
//! <!-- canvas:start -->
//! ...generated markdown...           machine-owned, replaced per sync
//! <!-- canvas:end -->
//!
//! ## Notes
//! ...                                user-owned, never touched
//! ```
//!
//! Sync never fails the enclosing save: every problem reduces to a log
//! line and a `None` result.

use chrono::Local;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Start of the machine-owned region.
pub const SYNC_START: &str = "<!-- canvas:start -->";
/// End of the machine-owned region.
pub const SYNC_END: &str = "<!-- canvas:end -->";

/// Logseq's namespace separator in page file names.
const PAGE_PREFIX: &str = "canvas___";

static UPDATED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^updated:: .*$").expect("valid regex"));

/// Mirror target rooted at a Logseq pages directory.
#[derive(Debug, Clone)]
pub struct LogseqSync {
    pages_dir: PathBuf,
}

impl LogseqSync {
    pub fn new(pages_dir: impl Into<PathBuf>) -> Self {
        Self {
            pages_dir: pages_dir.into(),
        }
    }

    pub fn pages_dir(&self) -> &Path {
        &self.pages_dir
    }

    /// Write or refresh the page for a canvas.
    ///
    /// Returns the page path on success and `None` whenever sync did
    /// not apply, whether because the pages directory is missing
    /// (integration not installed), the existing page lost its markers,
    /// or plain I/O failure. Never returns an error.
    pub fn sync(&self, name: &str, canvas_id: &str, markdown: &str) -> Option<PathBuf> {
        if !self.pages_dir.is_dir() {
            debug!(
                "Logseq pages dir {} not present, skipping sync",
                self.pages_dir.display()
            );
            return None;
        }

        let page_path = self
            .pages_dir
            .join(format!("{}{}.md", PAGE_PREFIX, sanitize_page_name(name)));

        let result = if page_path.exists() {
            self.update_page(&page_path, markdown)
        } else {
            self.create_page(&page_path, canvas_id, markdown)
        };

        match result {
            Ok(()) => {
                info!("Synced canvas {:?} to {}", name, page_path.display());
                Some(page_path)
            }
            Err(e) => {
                warn!("Logseq sync failed for {:?}: {}", name, e);
                None
            }
        }
    }

    fn create_page(&self, path: &Path, canvas_id: &str, markdown: &str) -> std::io::Result<()> {
        let today = Local::now().format("%Y-%m-%d");
        let page = format!(
            "type:: canvas\n\
             canvas-id:: {canvas_id}\n\
             updated:: {today}\n\
             source:: ai-canvas\n\
             \n\
             {SYNC_START}\n\
             {markdown}\n\
             {SYNC_END}\n\
             \n\
             ## Notes\n\
             \n"
        );
        fs::write(path, page)
    }

    fn update_page(&self, path: &Path, markdown: &str) -> std::io::Result<()> {
        let existing = fs::read_to_string(path)?;

        let Some(updated) = replace_sync_region(&existing, markdown) else {
            return Err(std::io::Error::other(format!(
                "page {} has no intact sync markers, leaving it untouched",
                path.display()
            )));
        };

        let today = Local::now().format("%Y-%m-%d");
        let updated = UPDATED_RE.replace(&updated, format!("updated:: {today}"));

        fs::write(path, updated.as_ref())
    }
}

/// Replace filesystem-unsafe characters with underscores.
fn sanitize_page_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// Swap the text strictly between the sync markers for `markdown`.
///
/// Bytes before the start marker and after the end marker come through
/// verbatim. Returns `None` when either marker is missing or they are
/// out of order.
fn replace_sync_region(page: &str, markdown: &str) -> Option<String> {
    let start = page.find(SYNC_START)? + SYNC_START.len();
    let end = page[start..].find(SYNC_END)? + start;

    Some(format!(
        "{}\n{}\n{}",
        &page[..start],
        markdown,
        &page[end..]
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sync_target() -> (TempDir, LogseqSync) {
        let temp = TempDir::new().unwrap();
        let pages = temp.path().join("pages");
        std::fs::create_dir_all(&pages).unwrap();
        (temp, LogseqSync::new(pages))
    }

    #[test]
    fn test_missing_pages_dir_skips_without_error() {
        let temp = TempDir::new().unwrap();
        let sync = LogseqSync::new(temp.path().join("no-such-dir"));

        assert_eq!(sync.sync("foo", "id-1", "# md"), None);
    }

    #[test]
    fn test_first_sync_creates_page_from_template() {
        let (_temp, sync) = sync_target();

        let path = sync.sync("My Board", "id-1", "# My Board\n\n- hello").unwrap();
        let page = std::fs::read_to_string(&path).unwrap();

        assert!(path.ends_with("canvas___My Board.md"));
        assert!(page.starts_with("type:: canvas\ncanvas-id:: id-1\nupdated:: "));
        assert!(page.contains("source:: ai-canvas"));
        assert!(page.contains(&format!("{}\n# My Board\n\n- hello\n{}", SYNC_START, SYNC_END)));
        assert!(page.contains("## Notes"));
    }

    #[test]
    fn test_resync_replaces_only_the_delimited_region() {
        let (_temp, sync) = sync_target();

        let path = sync.sync("board", "id-1", "old content").unwrap();

        // User edits outside the sync region
        let page = std::fs::read_to_string(&path).unwrap();
        let edited = page.replace("## Notes\n\n", "## Notes\n\n- my own thoughts\n");
        std::fs::write(&path, &edited).unwrap();

        let resynced_path = sync.sync("board", "id-1", "new content").unwrap();
        assert_eq!(resynced_path, path);

        let resynced = std::fs::read_to_string(&path).unwrap();
        assert!(resynced.contains(&format!("{}\nnew content\n{}", SYNC_START, SYNC_END)));
        assert!(!resynced.contains("old content"));
        assert!(resynced.contains("- my own thoughts"));

        // Everything outside the markers is byte-identical
        let before_region = |s: &str| s[..s.find(SYNC_START).unwrap()].to_string();
        let after_region = |s: &str| s[s.find(SYNC_END).unwrap()..].to_string();
        // updated:: date may differ in the header, so compare from canvas-id down
        assert_eq!(
            after_region(&edited),
            after_region(&resynced),
            "user section must survive resync"
        );
        assert!(before_region(&resynced).contains("canvas-id:: id-1"));
    }

    #[test]
    fn test_resync_rewrites_updated_date() {
        let (_temp, sync) = sync_target();

        let path = sync.sync("board", "id-1", "content").unwrap();
        let page = std::fs::read_to_string(&path).unwrap();
        let stale = page.replace(
            &format!("updated:: {}", Local::now().format("%Y-%m-%d")),
            "updated:: 1999-01-01",
        );
        std::fs::write(&path, stale).unwrap();

        sync.sync("board", "id-1", "content").unwrap();

        let refreshed = std::fs::read_to_string(&path).unwrap();
        assert!(!refreshed.contains("updated:: 1999-01-01"));
        assert!(refreshed.contains(&format!("updated:: {}", Local::now().format("%Y-%m-%d"))));
    }

    #[test]
    fn test_page_without_markers_left_untouched() {
        let (_temp, sync) = sync_target();

        let path = sync.pages_dir().join("canvas___board.md");
        std::fs::write(&path, "hand-written page, markers deleted").unwrap();

        assert_eq!(sync.sync("board", "id-1", "content"), None);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "hand-written page, markers deleted"
        );
    }

    #[test]
    fn test_unsafe_characters_sanitized_in_page_name() {
        let (_temp, sync) = sync_target();

        let path = sync.sync("a/b:c?d", "id-1", "content").unwrap();
        assert!(path.ends_with("canvas___a_b_c_d.md"));
    }

    #[test]
    fn test_sanitize_page_name() {
        assert_eq!(sanitize_page_name("plain name"), "plain name");
        assert_eq!(sanitize_page_name("a<b>|c"), "a_b__c");
        assert_eq!(sanitize_page_name("tab\there"), "tab_here");
    }

    #[test]
    fn test_replace_sync_region_requires_ordered_markers() {
        let reversed = format!("{}\nmiddle\n{}", SYNC_END, SYNC_START);
        assert_eq!(replace_sync_region(&reversed, "new"), None);
        assert_eq!(replace_sync_region("no markers at all", "new"), None);
    }
}
