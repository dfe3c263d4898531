//! Code 128 (set B) encoding rendered as SVG.
//!
//! Produces the same picture a browser barcode widget would: bars at two
//! pixels per module, 80 pixels tall, with the encoded text printed below.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

/// Bar/space widths for symbol values 0..=105.
const PATTERNS: [&str; 106] = [
    "212222", "222122", "222221", "121223", "121322", "131222", "122213", "122312",
    "132212", "221213", "221312", "231212", "112232", "122132", "122231", "113222",
    "123122", "123221", "223211", "221132", "221231", "213212", "223112", "312131",
    "311222", "321122", "321221", "312212", "322112", "322211", "212123", "212321",
    "232121", "111323", "131123", "131321", "112313", "132113", "132311", "211313",
    "231113", "231311", "112133", "112331", "132131", "113123", "113321", "133121",
    "313121", "211331", "231131", "213113", "213311", "213131", "311123", "311321",
    "331121", "312113", "312311", "332111", "314111", "221411", "431111", "111224",
    "111422", "121124", "121421", "141122", "141221", "112214", "112412", "122114",
    "122411", "142112", "142211", "241211", "221114", "413111", "241112", "134111",
    "111242", "121142", "121241", "114212", "124112", "124211", "411212", "421112",
    "421211", "212141", "214121", "412121", "111143", "111341", "131141", "114113",
    "114311", "411113", "411311", "113141", "114131", "311141", "411131", "211412",
    "211214", "211232",
];

const STOP_PATTERN: &str = "2331112";
const START_B: usize = 104;
const QUIET_ZONE_MODULES: u32 = 10;

/// Barcode encoding errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BarcodeError {
    /// Nothing to encode.
    #[error("cannot encode an empty barcode")]
    Empty,

    /// Character outside printable ASCII, which set B cannot encode.
    #[error("character {0:?} cannot be encoded in Code 128 set B")]
    UnsupportedCharacter(char),
}

/// Rendering options.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgOptions {
    /// Width of one module in pixels
    pub module_width: u32,
    /// Bar height in pixels
    pub height: u32,
    /// Print the encoded text under the bars
    pub display_value: bool,
    pub font_size: u32,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            module_width: 2,
            height: 80,
            display_value: true,
            font_size: 20,
        }
    }
}

/// Symbol values for `text`: start B, data, checksum.
pub fn symbol_values(text: &str) -> Result<Vec<usize>, BarcodeError> {
    if text.is_empty() {
        return Err(BarcodeError::Empty);
    }

    let mut values = Vec::with_capacity(text.len() + 2);
    values.push(START_B);
    for c in text.chars() {
        if !(' '..='~').contains(&c) {
            return Err(BarcodeError::UnsupportedCharacter(c));
        }
        values.push(c as usize - 32);
    }

    let checksum = values
        .iter()
        .enumerate()
        .map(|(position, value)| position.max(1) * value)
        .sum::<usize>()
        % 103;
    values.push(checksum);
    Ok(values)
}

/// Module sequence for `text`, `true` for a bar. Excludes quiet zones.
pub fn encode(text: &str) -> Result<Vec<bool>, BarcodeError> {
    let values = symbol_values(text)?;
    let mut modules = Vec::with_capacity(values.len() * 11 + 13);

    let widths = values
        .iter()
        .map(|&v| PATTERNS[v])
        .chain(std::iter::once(STOP_PATTERN));
    for pattern in widths {
        for (i, width) in pattern.bytes().enumerate() {
            let bar = i % 2 == 0;
            for _ in 0..(width - b'0') {
                modules.push(bar);
            }
        }
    }
    Ok(modules)
}

/// Render `text` as a standalone SVG document.
pub fn render_svg(text: &str, options: &SvgOptions) -> Result<String, BarcodeError> {
    let modules = encode(text)?;
    let unit = options.module_width.max(1);
    let quiet = QUIET_ZONE_MODULES * unit;
    let width = modules.len() as u32 * unit + 2 * quiet;
    let text_height = if options.display_value {
        options.font_size + 4
    } else {
        0
    };
    let height = options.height + text_height;

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    svg.push_str(&format!(
        r##"<rect x="0" y="0" width="{width}" height="{height}" fill="#ffffff"/>"##
    ));
    svg.push_str(r##"<g fill="#000000">"##);

    let mut x = 0;
    while x < modules.len() {
        if !modules[x] {
            x += 1;
            continue;
        }
        let start = x;
        while x < modules.len() && modules[x] {
            x += 1;
        }
        svg.push_str(&format!(
            r#"<rect x="{}" y="0" width="{}" height="{}"/>"#,
            quiet + start as u32 * unit,
            (x - start) as u32 * unit,
            options.height
        ));
    }

    if options.display_value {
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" text-anchor="middle" font-family="monospace" font-size="{}">{}</text>"#,
            width / 2,
            options.height + options.font_size,
            options.font_size,
            escape_xml(text)
        ));
    }
    svg.push_str("</g></svg>");
    Ok(svg)
}

/// Render `text` as a `data:image/svg+xml;base64,...` URI.
pub fn data_uri(text: &str, options: &SvgOptions) -> Result<String, BarcodeError> {
    let svg = render_svg(text, options)?;
    Ok(format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg)))
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_are_eleven_modules() {
        for (value, pattern) in PATTERNS.iter().enumerate() {
            let total: u32 = pattern.bytes().map(|b| (b - b'0') as u32).sum();
            assert_eq!(total, 11, "pattern for value {value}");
        }
        let stop: u32 = STOP_PATTERN.bytes().map(|b| (b - b'0') as u32).sum();
        assert_eq!(stop, 13);
    }

    #[test]
    fn test_checksum() {
        // "PJJ123C": 104 + 48 + 2*42 + 3*42 + 4*17 + 5*18 + 6*19 + 7*35 = 879; 879 % 103 = 55
        let values = symbol_values("PJJ123C").unwrap();
        assert_eq!(values.first(), Some(&104));
        assert_eq!(values.last(), Some(&55));
        assert_eq!(values.len(), 9);
    }

    #[test]
    fn test_encode_length() {
        let modules = encode("PIG001234567").unwrap();
        // start + 12 data + checksum at 11 modules, stop at 13
        assert_eq!(modules.len(), 14 * 11 + 13);
        assert!(modules[0]);
        assert!(*modules.last().unwrap());
    }

    #[test]
    fn test_rejects_unsupported() {
        assert_eq!(symbol_values(""), Err(BarcodeError::Empty));
        assert_eq!(
            symbol_values("PIG\u{e9}"),
            Err(BarcodeError::UnsupportedCharacter('\u{e9}'))
        );
        assert_eq!(
            symbol_values("PIG\n"),
            Err(BarcodeError::UnsupportedCharacter('\n'))
        );
    }

    #[test]
    fn test_render_svg() {
        let svg = render_svg("PLT001234569", &SvgOptions::default()).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(">PLT001234569</text>"));
        assert!(svg.contains(r#"height="80""#));
    }

    #[test]
    fn test_render_without_text() {
        let options = SvgOptions {
            display_value: false,
            ..Default::default()
        };
        let svg = render_svg("PLT001234569", &options).unwrap();
        assert!(!svg.contains("<text"));
    }

    #[test]
    fn test_text_is_escaped() {
        let svg = render_svg("A<B&C", &SvgOptions::default()).unwrap();
        assert!(svg.contains("A&lt;B&amp;C"));
    }

    #[test]
    fn test_data_uri() {
        let uri = data_uri("PIG001234567", &SvgOptions::default()).unwrap();
        let payload = uri.strip_prefix("data:image/svg+xml;base64,").unwrap();
        let decoded = String::from_utf8(STANDARD.decode(payload).unwrap()).unwrap();
        assert!(decoded.contains("PIG001234567"));
    }
}
