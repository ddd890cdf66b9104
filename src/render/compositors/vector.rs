//! Compositor for the vector backend.
//!
//! The widget keeps its graphics in a live SVG scene whose root `<svg>`
//! element has one child per graphics layer, with id `<name>_layer`. Each
//! requested layer is cut out of the scene, wrapped in a standalone SVG
//! document sized like the map, rasterized offscreen and drawn onto the
//! output. A layer that cannot be found or rendered is logged and skipped.

use anyhow::{anyhow, Context};
use log::{debug, warn};
use resvg::usvg;
use resvg::usvg::fontdb;
use roxmltree::{Document, Node};
use crate::render::compositor::{GraphicsLayers, OverlayCompositor, OverlayContext, SurfaceSize};
use crate::render::{OutputSurface, RasterImage};

const LAYER_SUFFIX: &str = "_layer";

/// Rasterizes graphics layers with the fonts installed on the host, so text
/// symbols and labels render like the rest of the layer.
#[derive(Debug)]
pub struct VectorOverlayCompositor {
    options: usvg::Options<'static>,
}

impl VectorOverlayCompositor {
    pub fn new() -> Self {
        let mut options = usvg::Options::default();
        let db = options.fontdb_mut();
        db.load_system_fonts();
        ensure_serif_fallback(db);
        debug!("Vector compositor loaded {} font faces", db.len());

        Self { options }
    }
}

impl Default for VectorOverlayCompositor {
    fn default() -> Self {
        Self::new()
    }
}

/// Text without a matching family falls back to the serif family. Points it
/// at an installed face when the configured one is missing.
fn ensure_serif_fallback(db: &mut fontdb::Database) {
    let serif = db.family_name(&fontdb::Family::Serif).to_string();
    let installed = db
        .faces()
        .any(|face| face.families.iter().any(|(name, _)| *name == serif));
    if installed {
        return;
    }

    let fallback = db
        .faces()
        .find_map(|face| face.families.first())
        .map(|(name, _)| name.clone());
    match fallback {
        Some(name) => {
            debug!("Serif family `{serif}` is not installed; falling back to `{name}`");
            db.set_serif_family(name);
        }
        None => warn!("No fonts found; text in graphics layers will not render"),
    }
}

impl OverlayCompositor for VectorOverlayCompositor {
    fn name(&self) -> &'static str {
        "vector"
    }

    fn composite(&self, ctx: &OverlayContext<'_>, surface: &mut OutputSurface) -> anyhow::Result<usize> {
        let Some(markup) = ctx.scene.vector_markup.as_deref() else {
            debug!("No live vector scene; nothing to rasterize");
            return Ok(0);
        };

        let doc = match Document::parse(markup) {
            Ok(doc) => doc,
            Err(e) => {
                warn!("Unable to parse live vector scene: {e}");
                return Ok(0);
            }
        };
        let Some(root) = scene_root(&doc) else {
            warn!("Live vector scene has no <svg> element");
            return Ok(0);
        };

        let names = match ctx.graphics_layers {
            GraphicsLayers::All => graphics_layer_names(root),
            GraphicsLayers::Named(names) => names.clone(),
        };

        let mut drawn = 0;
        for name in &names {
            match rasterize_layer(markup, root, name, ctx.native_size, &self.options) {
                Ok(raster) => {
                    surface.draw_raster(&raster)?;
                    drawn += 1;
                }
                Err(e) => warn!("Skipping graphics layer {name}: {e:#}"),
            }
        }

        Ok(drawn)
    }
}

/// The first `<svg>` element of the scene, in document order.
fn scene_root<'a, 'input>(doc: &'a Document<'input>) -> Option<Node<'a, 'input>> {
    doc.descendants().find(|n| n.has_tag_name("svg"))
}

fn layer_fragment<'a, 'input>(root: Node<'a, 'input>, id: &str) -> Option<Node<'a, 'input>> {
    root.children()
        .filter(|n| n.is_element())
        .find(|n| n.attribute("id") == Some(id))
}

/// Names of every graphics layer directly under the scene root.
fn graphics_layer_names(root: Node<'_, '_>) -> Vec<String> {
    root.children()
        .filter(|n| n.is_element())
        .filter_map(|n| n.attribute("id")?.strip_suffix(LAYER_SUFFIX))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Source text of everything between the element's start and end tags.
fn inner_markup<'i>(markup: &'i str, node: Node<'_, 'i>) -> &'i str {
    match (node.first_child(), node.last_child()) {
        (Some(first), Some(last)) => &markup[first.range().start..last.range().end],
        _ => "",
    }
}

fn standalone_document(inner: &str, size: SurfaceSize) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}">{inner}</svg>"#,
        w = size.width,
        h = size.height,
    )
}

fn rasterize_layer(
    markup: &str,
    root: Node<'_, '_>,
    name: &str,
    size: SurfaceSize,
    options: &usvg::Options<'_>,
) -> anyhow::Result<RasterImage> {
    let id = format!("{name}{LAYER_SUFFIX}");
    let fragment = layer_fragment(root, &id).ok_or_else(|| anyhow!("no element with id `{id}` in the live scene"))?;

    let document = standalone_document(inner_markup(markup, fragment), size);
    let tree = usvg::Tree::from_str(&document, options)
        .with_context(|| format!("parsing fragment `{id}`"))?;

    let mut pixmap = tiny_skia::Pixmap::new(size.width, size.height)
        .ok_or_else(|| anyhow!("cannot allocate a {}x{} offscreen buffer", size.width, size.height))?;
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

    Ok(RasterImage::from_pixmap(pixmap))
}
