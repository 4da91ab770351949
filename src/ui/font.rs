use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{BUNDLED_FONT, BUNDLED_FONT_NAME};

#[derive(Debug, Error)]
pub enum FontError {
    #[error("cannot read font {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("font line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

/// Multi-row glyphs used to draw the converted amounts large.
///
/// Glyph file layout:
///
/// ```text
/// # comment
/// height 3
/// : 0
/// ┏━┓
/// ┃ ┃
/// ┗━┛
/// ```
///
/// Rows are padded to the widest row of their glyph, so trailing blanks may
/// be omitted.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayFont {
    name: String,
    height: usize,
    glyphs: HashMap<char, Vec<String>>,
}

impl DisplayFont {
    /// Plain terminal text, one row high.
    pub fn system_default() -> Self {
        Self {
            name: "system".to_string(),
            height: 1,
            glyphs: HashMap::new(),
        }
    }

    /// The block digits compiled into the binary.
    pub fn bundled() -> Self {
        match Self::parse(BUNDLED_FONT_NAME, BUNDLED_FONT) {
            Ok(font) => font,
            Err(err) => {
                log::error!("bundled font is broken: {err}; using the system font");
                Self::system_default()
            }
        }
    }

    pub async fn load(path: &Path) -> Result<Self, FontError> {
        let source = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| FontError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::parse(name, &source)
    }

    /// Loads `path`, falling back to [`DisplayFont::system_default`] on error.
    pub async fn load_or_default(path: &Path) -> Self {
        match Self::load(path).await {
            Ok(font) => {
                log::info!("loaded font {} ({} glyphs)", font.name, font.glyphs.len());
                font
            }
            Err(err) => {
                log::warn!("{err}; using the system font");
                Self::system_default()
            }
        }
    }

    pub fn parse(name: impl Into<String>, source: &str) -> Result<Self, FontError> {
        let mut height: Option<usize> = None;
        let mut glyphs = HashMap::new();
        let mut lines = source.lines().enumerate().map(|(idx, line)| (idx + 1, line));

        while let Some((line_no, line)) = lines.next() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            if let Some(value) = trimmed.strip_prefix("height") {
                let parsed = value
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .filter(|h| *h > 0)
                    .ok_or_else(|| FontError::Parse {
                        line: line_no,
                        reason: format!("bad height {:?}", value.trim()),
                    })?;
                height = Some(parsed);
                continue;
            }

            if let Some(rest) = trimmed.strip_prefix(':') {
                let rows_needed = height.ok_or_else(|| FontError::Parse {
                    line: line_no,
                    reason: "glyph defined before height".to_string(),
                })?;
                let ch = glyph_char(rest.trim()).ok_or_else(|| FontError::Parse {
                    line: line_no,
                    reason: format!("expected one character, got {:?}", rest.trim()),
                })?;

                let mut rows = Vec::with_capacity(rows_needed);
                for _ in 0..rows_needed {
                    let (_, row) = lines.next().ok_or_else(|| FontError::Parse {
                        line: line_no,
                        reason: format!("glyph {ch:?} ends early"),
                    })?;
                    rows.push(row.trim_end().to_string());
                }
                let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
                for row in rows.iter_mut() {
                    let pad = width - row.chars().count();
                    row.extend(std::iter::repeat_n(' ', pad));
                }
                glyphs.insert(ch, rows);
                continue;
            }

            return Err(FontError::Parse {
                line: line_no,
                reason: format!("unexpected {trimmed:?}"),
            });
        }

        let height = height.ok_or_else(|| FontError::Parse {
            line: 0,
            reason: "missing height".to_string(),
        })?;
        if glyphs.is_empty() {
            return Err(FontError::Parse {
                line: 0,
                reason: "no glyphs".to_string(),
            });
        }

        Ok(Self {
            name: name.into(),
            height,
            glyphs,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Draws `text` as `height` rows. Characters without a glyph are placed
    /// on the middle row.
    pub fn render(&self, text: &str) -> Vec<String> {
        let middle = (self.height - 1) / 2;
        let gap = if self.height > 1 { " " } else { "" };
        let mut rows = vec![String::new(); self.height];

        for (i, ch) in text.chars().enumerate() {
            if i > 0 {
                rows.iter_mut().for_each(|row| row.push_str(gap));
            }
            match self.glyphs.get(&ch) {
                Some(glyph) => {
                    for (row, part) in rows.iter_mut().zip(glyph) {
                        row.push_str(part);
                    }
                }
                None => {
                    for (idx, row) in rows.iter_mut().enumerate() {
                        row.push(if idx == middle { ch } else { ' ' });
                    }
                }
            }
        }
        rows
    }
}

fn glyph_char(token: &str) -> Option<char> {
    if token == "space" {
        return Some(' ');
    }
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TINY: &str = "\
# two-row test font
height 2

: 1
 |
 |
: .

o
";

    #[test]
    fn parses_glyphs_and_pads_rows() {
        let font = DisplayFont::parse("tiny", TINY).unwrap();
        assert_eq!(font.height(), 2);
        assert_eq!(font.render("1"), vec![" |", " |"]);
        assert_eq!(font.render("."), vec![" ", "o"]);
    }

    #[test]
    fn renders_with_gap_and_fallback() {
        let font = DisplayFont::parse("tiny", TINY).unwrap();
        assert_eq!(font.render("1.1"), vec![" |    |", " | o  |"]);
        assert_eq!(font.render("$1"), vec!["$  |", "   |"]);
    }

    #[test]
    fn system_default_is_plain_text() {
        let font = DisplayFont::system_default();
        assert_eq!(font.render("$ 1,000.00"), vec!["$ 1,000.00"]);
    }

    #[test]
    fn rejects_glyph_before_height() {
        let err = DisplayFont::parse("bad", ": 1\nx\n").unwrap_err();
        assert!(matches!(err, FontError::Parse { line: 1, .. }));
    }

    #[test]
    fn rejects_truncated_glyph() {
        let err = DisplayFont::parse("bad", "height 3\n: 1\n|\n").unwrap_err();
        assert!(matches!(err, FontError::Parse { line: 2, .. }));
    }

    #[test]
    fn rejects_zero_height_and_stray_lines() {
        assert!(DisplayFont::parse("bad", "height 0\n").is_err());
        assert!(DisplayFont::parse("bad", "height 1\nwhat\n").is_err());
        assert!(DisplayFont::parse("bad", "height 1\n").is_err());
    }

    #[tokio::test]
    async fn missing_file_falls_back() {
        let path = Path::new("/nonexistent/convert/font.txt");
        assert!(matches!(
            DisplayFont::load(path).await,
            Err(FontError::Io { .. })
        ));
        assert_eq!(
            DisplayFont::load_or_default(path).await,
            DisplayFont::system_default()
        );
    }

    #[test]
    fn bundled_font_covers_digits() {
        let font = DisplayFont::bundled();
        assert_eq!(font.name(), BUNDLED_FONT_NAME);
        assert_eq!(font.height(), 3);
        for ch in "0123456789,.-".chars() {
            assert!(font.glyphs.contains_key(&ch), "missing {ch:?}");
        }
    }
}
