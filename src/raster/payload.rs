use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::foundation::error::{SockyError, SockyResult};

pub const SVG_DATA_URI_PREFIX: &str = "data:image/svg+xml;base64,";

/// Serialized vector image wrapped as a base64 `data:` URI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SvgPayload {
    uri: String,
}

impl SvgPayload {
    pub fn encode(svg: &str) -> Self {
        let mut uri = String::with_capacity(SVG_DATA_URI_PREFIX.len() + svg.len() * 4 / 3 + 4);
        uri.push_str(SVG_DATA_URI_PREFIX);
        STANDARD.encode_string(svg.as_bytes(), &mut uri);
        Self { uri }
    }

    /// Wrap an existing URI without checking it. Problems surface in [`Self::decode`].
    pub fn from_uri(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }

    pub fn as_uri(&self) -> &str {
        &self.uri
    }

    /// Raw SVG bytes carried by the payload.
    pub fn svg_bytes(&self) -> SockyResult<Vec<u8>> {
        let b64 = self
            .uri
            .strip_prefix(SVG_DATA_URI_PREFIX)
            .ok_or_else(|| SockyError::decode("payload is not a base64 svg data uri"))?;
        STANDARD
            .decode(b64)
            .map_err(|e| SockyError::decode(format!("payload base64: {e}")))
    }

    /// Decode into a parsed SVG tree.
    pub fn decode(&self) -> SockyResult<usvg::Tree> {
        let bytes = self.svg_bytes()?;
        let opts = usvg::Options::default();
        usvg::Tree::from_data(&bytes, &opts)
            .map_err(|e| SockyError::decode(format!("parse svg tree: {e}")))
    }
}
