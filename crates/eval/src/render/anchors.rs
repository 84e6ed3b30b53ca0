//! Signature and date anchor resolution.
//!
//! Every replacement is a single inline element, so the line structure of the
//! document is the same in both modes and field coordinates measured on the
//! interactive render stay valid for the PDF render.

use quire_core::{Contract, FieldKind, Party};

use super::escape::escape_html;
use super::RenderMode;

/// Height of embedded signature images in PDF output.
pub const SIGNATURE_IMAGE_HEIGHT_PX: u32 = 48;

/// Empty bordered box left for signing a printed copy by hand.
fn blank_box(kind: FieldKind) -> String {
    let (width, height) = match kind {
        FieldKind::Signature => (220, 48),
        FieldKind::Date => (140, 24),
    };
    format!(
        r#"<span class="signature-blank" data-field="{}" style="display:inline-block;width:{}px;height:{}px;border:1px solid #333;vertical-align:bottom;"></span>"#,
        kind.as_str(),
        width,
        height
    )
}

/// Untagged marker for an unknown party: no field is placed, the line stays.
const EMPTY_MARKER: &str = r#"<span class="signature-anchor"></span>"#;

/// Marker measured by the signing UI to place fields.
fn marker(party: Party, kind: FieldKind) -> String {
    format!(
        r#"<span class="signature-anchor" data-party="{}" data-field="{}"></span>"#,
        party.as_str(),
        kind.as_str()
    )
}

fn captured(party: Party, kind: FieldKind, value: &str) -> String {
    match kind {
        FieldKind::Signature => format!(
            r#"<img class="signature-image" src="{}" alt="{} signature" style="height:{}px;" />"#,
            escape_html(value),
            party.as_str(),
            SIGNATURE_IMAGE_HEIGHT_PX
        ),
        FieldKind::Date => format!("<strong>{}</strong>", escape_html(value)),
    }
}

/// Replacement markup for an anchor `{{<kind>_placeholder_<party>}}`.
///
/// Anchors naming a party other than provider or client become an untagged
/// marker in interactive mode and a blank box in PDF mode.
pub fn resolve_anchor(party: &str, kind: FieldKind, contract: &Contract, mode: RenderMode) -> String {
    let party = Party::parse(party);
    match mode {
        RenderMode::Interactive => party
            .map(|p| marker(p, kind))
            .unwrap_or_else(|| EMPTY_MARKER.to_string()),
        RenderMode::Pdf => party
            .and_then(|p| contract.captured_value(p, kind).map(|v| captured(p, kind, v)))
            .unwrap_or_else(|| blank_box(kind)),
    }
}
