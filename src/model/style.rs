use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const FONT_SIZE_RANGE: RangeInclusive<u32> = 8..=72;
const LINE_HEIGHT_RANGE: RangeInclusive<f32> = 1.0..=3.0;

/// Reader-facing typography overrides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleOptions {
    /// Body font size in CSS pixels.
    pub font_size_px: u32,
    /// Unitless CSS line height.
    pub line_height: f32,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            font_size_px: 16,
            line_height: 1.8,
        }
    }
}

impl StyleOptions {
    pub fn validate(&self) -> Result<()> {
        if !FONT_SIZE_RANGE.contains(&self.font_size_px) {
            return Err(Error::InvalidStyle(format!(
                "font size {}px is outside {}..={}px",
                self.font_size_px,
                FONT_SIZE_RANGE.start(),
                FONT_SIZE_RANGE.end()
            )));
        }
        if !LINE_HEIGHT_RANGE.contains(&self.line_height) {
            return Err(Error::InvalidStyle(format!(
                "line height {} is outside {}..={}",
                self.line_height,
                LINE_HEIGHT_RANGE.start(),
                LINE_HEIGHT_RANGE.end()
            )));
        }
        Ok(())
    }

    /// Render the book stylesheet with these options applied.
    pub fn render_stylesheet(&self) -> String {
        format!(
            r#"@namespace epub "http://www.idpf.org/2007/ops";

body {{
    font-family: "Noto Sans KR", serif;
    font-size: {font_size}px;
    line-height: {line_height};
    padding: 5% 10%;
    text-align: justify;
}}

h1 {{
    text-align: center;
    margin-bottom: 2em;
    border-bottom: 1px solid #ccc;
    padding-bottom: 0.5em;
}}

p {{
    margin: 0 0 1em 0;
    text-indent: 1em;
}}

p.dialogue {{
    text-indent: 0;
}}

p.scene-break {{
    text-align: center;
    text-indent: 0;
    margin: 2em 0;
    font-weight: bold;
}}
"#,
            font_size = self.font_size_px,
            line_height = self.line_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stylesheet() {
        let css = StyleOptions::default().render_stylesheet();
        assert!(css.contains("font-size: 16px;"));
        assert!(css.contains("line-height: 1.8;"));
        assert!(css.contains("p.scene-break"));
    }

    #[test]
    fn test_overrides_applied() {
        let css = StyleOptions {
            font_size_px: 20,
            line_height: 2.2,
        }
        .render_stylesheet();
        assert!(css.contains("font-size: 20px;"));
        assert!(css.contains("line-height: 2.2;"));
    }

    #[test]
    fn test_validate_ranges() {
        assert!(StyleOptions::default().validate().is_ok());

        let tiny = StyleOptions {
            font_size_px: 2,
            ..Default::default()
        };
        assert!(matches!(tiny.validate(), Err(Error::InvalidStyle(_))));

        let loose = StyleOptions {
            line_height: 5.0,
            ..Default::default()
        };
        assert!(matches!(loose.validate(), Err(Error::InvalidStyle(_))));

        let nan = StyleOptions {
            line_height: f32::NAN,
            ..Default::default()
        };
        assert!(nan.validate().is_err());
    }
}
