//! Bar series over a retained scene graph.
//!
//! Configuration writes cascade synchronously: reprocess the data when the
//! change affects domains, then relayout if anything came of it. The layout
//! pass reconciles freshly positioned records against the retained node set
//! so unchanged bars are updated in place rather than rebuilt.

use tracing::{debug, trace};

use crate::chart::ChartHost;
use crate::color::{Rgba, DEFAULT_PALETTE};
use crate::data::Datum;
use crate::error::Result;
use crate::join;
use crate::scale::BandScale;
use crate::scene::{DropShadow, NodeTag, SceneGraph, TextAlign};

use super::process::ProcessedSeries;

/// Padding fraction of the group sub-scale.
const GROUP_PADDING: f32 = 0.1;
/// Label offset below the top edge of its bar, in pixels.
const LABEL_OFFSET: f32 = 20.0;
/// Label font size in pixels.
const LABEL_FONT_SIZE: f32 = 14.0;
/// Label font family.
const LABEL_FONT_FAMILY: &str = "Verdana";

/// One positioned bar. Recomputed every layout pass, never retained.
#[derive(Debug, Clone, PartialEq)]
struct BarDatum {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    fill: Rgba,
    stroke: Rgba,
    stroke_width: f32,
    label: String,
}

/// Retained (rectangle, label) node pair backing one bar.
#[derive(Debug, Clone, Copy)]
struct BarNodes<Id> {
    rect: Id,
    label: Id,
}

/// A bar/column series rendering one bar per (category, value field) pair.
///
/// With a single value field this is the plain bar series; multiple fields
/// stack onto signed running totals, or sit side by side within the
/// category band when grouped.
#[derive(Debug)]
pub struct BarSeries<S: SceneGraph> {
    scene: S,
    data: Vec<Datum>,
    category_field: Option<String>,
    value_fields: Vec<String>,
    value_field_names: Vec<String>,
    grouped: bool,
    stroke: Rgba,
    stroke_width: f32,
    shadow: Option<DropShadow>,
    palette: Vec<Rgba>,
    /// Positions bars within their category band when grouped.
    group_scale: BandScale<String>,
    processed: Option<ProcessedSeries>,
    nodes: Vec<BarNodes<S::NodeId>>,
}

impl<S: SceneGraph> BarSeries<S> {
    /// Create a series rendering into `scene`.
    #[must_use]
    pub fn new(scene: S) -> Self {
        Self {
            scene,
            data: Vec::new(),
            category_field: None,
            value_fields: Vec::new(),
            value_field_names: Vec::new(),
            grouped: false,
            stroke: Rgba::BLACK,
            stroke_width: 1.0,
            shadow: None,
            palette: DEFAULT_PALETTE.to_vec(),
            group_scale: BandScale::new(),
            processed: None,
            nodes: Vec::new(),
        }
    }

    /// Replace the input rows.
    ///
    /// # Errors
    ///
    /// Propagates processing errors; the previously rendered scene and the
    /// cached domains stay as they were.
    pub fn set_data(&mut self, data: Vec<Datum>, host: &mut dyn ChartHost) -> Result<()> {
        self.data = data;
        if self.process_data(host)? {
            self.update(host);
        }
        Ok(())
    }

    /// Set the field holding each row's category key.
    ///
    /// # Errors
    ///
    /// Propagates processing errors, which a field name absent from the
    /// current rows will raise; `set_data_and_fields` replaces both sides
    /// at once.
    pub fn set_category_field(
        &mut self,
        field: impl Into<String>,
        host: &mut dyn ChartHost,
    ) -> Result<()> {
        let field = field.into();
        if self.category_field.as_ref() == Some(&field) {
            return Ok(());
        }
        self.category_field = Some(field);
        if self.process_data(host)? {
            self.update(host);
        }
        Ok(())
    }

    /// Set the ordered value fields.
    ///
    /// One field renders the plain bar series; several stack, or sit side
    /// by side when grouped. The group sub-scale is re-seeded from the
    /// field list.
    ///
    /// # Errors
    ///
    /// Propagates processing errors (see [`BarSeries::set_category_field`]).
    pub fn set_value_fields(
        &mut self,
        fields: Vec<String>,
        host: &mut dyn ChartHost,
    ) -> Result<()> {
        self.value_fields = fields;
        self.seed_group_scale();
        if self.process_data(host)? {
            self.update(host);
        }
        Ok(())
    }

    /// Replace rows, category field, and value fields as one atomic step.
    ///
    /// When the new rows and the new fields reference each other but not
    /// the old configuration, setting them one at a time would look fields
    /// up on rows that do not carry them. Applying all three before any
    /// domain computation reads them makes the swap safe.
    ///
    /// # Errors
    ///
    /// Propagates processing errors for genuinely invalid values; never
    /// fails from stale-field lookups alone.
    pub fn set_data_and_fields(
        &mut self,
        data: Vec<Datum>,
        category_field: impl Into<String>,
        value_fields: Vec<String>,
        host: &mut dyn ChartHost,
    ) -> Result<()> {
        self.category_field = Some(category_field.into());
        self.value_fields = value_fields;
        self.data = data;
        self.seed_group_scale();
        if self.process_data(host)? {
            self.update(host);
        }
        Ok(())
    }

    /// Switch between grouped and stacked composition.
    ///
    /// # Errors
    ///
    /// Propagates processing errors.
    pub fn set_grouped(&mut self, grouped: bool, host: &mut dyn ChartHost) -> Result<()> {
        if self.grouped == grouped {
            return Ok(());
        }
        self.grouped = grouped;
        if self.process_data(host)? {
            self.update(host);
        }
        Ok(())
    }

    /// Set per-field display names, used as bar labels.
    pub fn set_value_field_names(&mut self, names: Vec<String>, host: &dyn ChartHost) {
        self.value_field_names = names;
        self.update(host);
    }

    /// Set the shared stroke color.
    pub fn set_stroke(&mut self, stroke: Rgba, host: &dyn ChartHost) {
        if self.stroke != stroke {
            self.stroke = stroke;
            self.update(host);
        }
    }

    /// Set the shared stroke width.
    pub fn set_stroke_width(&mut self, width: f32, host: &dyn ChartHost) {
        if self.stroke_width != width {
            self.stroke_width = width;
            self.update(host);
        }
    }

    /// Attach or clear the drop shadow applied to every bar.
    pub fn set_shadow(&mut self, shadow: Option<DropShadow>, host: &dyn ChartHost) {
        if self.shadow != shadow {
            self.shadow = shadow;
            self.update(host);
        }
    }

    /// Replace the fill palette. An empty palette is ignored.
    pub fn set_palette(&mut self, palette: Vec<Rgba>, host: &dyn ChartHost) {
        if palette.is_empty() || self.palette == palette {
            return;
        }
        self.palette = palette;
        self.update(host);
    }

    /// The current input rows.
    #[must_use]
    pub fn data(&self) -> &[Datum] {
        &self.data
    }

    /// The configured category field, if any.
    #[must_use]
    pub fn category_field(&self) -> Option<&str> {
        self.category_field.as_deref()
    }

    /// The configured value fields.
    #[must_use]
    pub fn value_fields(&self) -> &[String] {
        &self.value_fields
    }

    /// Per-field display names.
    #[must_use]
    pub fn value_field_names(&self) -> &[String] {
        &self.value_field_names
    }

    /// Whether fields render side by side instead of stacked.
    #[must_use]
    pub const fn is_grouped(&self) -> bool {
        self.grouped
    }

    /// Shared stroke color.
    #[must_use]
    pub const fn stroke(&self) -> Rgba {
        self.stroke
    }

    /// Shared stroke width.
    #[must_use]
    pub const fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    /// The drop shadow applied to bars, if any.
    #[must_use]
    pub fn shadow(&self) -> Option<&DropShadow> {
        self.shadow.as_ref()
    }

    /// The fill palette.
    #[must_use]
    pub fn palette(&self) -> &[Rgba] {
        &self.palette
    }

    /// Category domain from the last successful processing pass.
    #[must_use]
    pub fn category_domain(&self) -> &[String] {
        self.processed.as_ref().map(ProcessedSeries::categories).unwrap_or_default()
    }

    /// Value domain from the last successful processing pass.
    #[must_use]
    pub fn value_domain(&self) -> Option<(f32, f32)> {
        self.processed.as_ref().map(ProcessedSeries::value_domain)
    }

    /// The full processed-series cache, if a pass has succeeded.
    #[must_use]
    pub fn processed(&self) -> Option<&ProcessedSeries> {
        self.processed.as_ref()
    }

    /// The scene this series renders into.
    #[must_use]
    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// Mutable access to the scene, for the owning renderer.
    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    fn seed_group_scale(&mut self) {
        self.group_scale.set_domain(self.value_fields.clone());
        self.group_scale.set_padding(GROUP_PADDING);
        self.group_scale.set_round(true);
    }

    /// Recompute domains and the value matrix from the current rows.
    ///
    /// Returns whether a relayout should follow. With no rows or no
    /// configured fields there is nothing to render and the cached state is
    /// left untouched. On success the new state is committed as a whole and
    /// the host is told its axes are stale; on error nothing is committed.
    fn process_data(&mut self, host: &mut dyn ChartHost) -> Result<bool> {
        let Some(category_field) = self.category_field.as_deref() else {
            trace!("no category field, nothing to render");
            return Ok(false);
        };
        if self.data.is_empty() || self.value_fields.is_empty() {
            trace!("no rows or no value fields, nothing to render");
            return Ok(false);
        }

        let processed = ProcessedSeries::compute(
            &self.data,
            category_field,
            &self.value_fields,
            self.grouped,
        )?;
        self.processed = Some(processed);

        if let Some(processed) = &self.processed {
            host.update_axes(processed.categories(), processed.value_domain());
        }
        Ok(true)
    }

    /// Lay the series out against the host's resolved axes.
    ///
    /// Skips silently while the host reports pending layout or unresolved
    /// axes; these are routine states during mount and reconfiguration, and
    /// the host re-invokes layout once they settle. Given unchanged inputs
    /// the pass rewrites identical properties onto the same nodes, a no-op
    /// diff.
    pub fn update(&mut self, host: &dyn ChartHost) {
        if host.is_layout_pending() {
            trace!("chart layout pending, skipping bar layout");
            return;
        }
        let (Some(x_axis), Some(y_axis)) = (host.x_axis(), host.y_axis()) else {
            trace!("axes unresolved, skipping bar layout");
            return;
        };
        let Some(processed) = &self.processed else {
            trace!("no processed data, skipping bar layout");
            return;
        };

        let x_scale = &x_axis.scale;
        let y_scale = &y_axis.scale;

        self.group_scale.set_range(0.0, x_scale.bandwidth());
        let bar_width = if self.grouped {
            self.group_scale.bandwidth()
        } else {
            x_scale.bandwidth()
        };

        let mut records =
            Vec::with_capacity(processed.categories().len() * self.value_fields.len());

        for (category, stack) in processed.categories().iter().zip(processed.values()) {
            let band_x = x_scale.convert(category);
            let mut pos_total = 0.0f32;
            let mut neg_total = 0.0f32;

            for (field_index, (field, &value)) in
                self.value_fields.iter().zip(stack).enumerate()
            {
                // Grouped bars rise from zero in their own slot; stacked
                // bars extend whichever signed total matches their sign.
                let (from, to) = if self.grouped {
                    (0.0, value)
                } else if value < 0.0 {
                    let from = neg_total;
                    neg_total += value;
                    (from, neg_total)
                } else {
                    let from = pos_total;
                    pos_total += value;
                    (from, pos_total)
                };

                let y0 = y_scale.convert(from);
                let y1 = y_scale.convert(to);
                let x = if self.grouped {
                    band_x + self.group_scale.convert(field)
                } else {
                    band_x
                };

                records.push(BarDatum {
                    x,
                    y: y0.min(y1),
                    width: bar_width,
                    height: (y0 - y1).abs(),
                    fill: self.palette[field_index % self.palette.len()],
                    stroke: self.stroke,
                    stroke_width: self.stroke_width,
                    label: self
                        .value_field_names
                        .get(field_index)
                        .cloned()
                        .unwrap_or_default(),
                });
            }
        }

        let shadow = self.shadow.clone();
        let stats = join::reconcile(
            &mut self.nodes,
            &records,
            &mut self.scene,
            |scene, _| {
                let rect = scene.create_rect(NodeTag::Bar);
                if let Some(node) = scene.rect_mut(rect) {
                    node.crisp = true;
                }
                let label = scene.create_text(NodeTag::Label);
                BarNodes { rect, label }
            },
            |scene, nodes, record| {
                if let Some(rect) = scene.rect_mut(nodes.rect) {
                    rect.x = record.x;
                    rect.y = record.y;
                    rect.width = record.width;
                    rect.height = record.height;
                    rect.fill = record.fill;
                    rect.stroke = record.stroke;
                    rect.stroke_width = record.stroke_width;
                    rect.shadow = shadow.clone();
                }
                if let Some(text) = scene.text_mut(nodes.label) {
                    if record.label.is_empty() {
                        text.visible = false;
                    } else {
                        text.text = record.label.clone();
                        text.align = TextAlign::Center;
                        text.x = record.x + record.width / 2.0;
                        text.y = record.y + LABEL_OFFSET;
                        text.fill = Rgba::BLACK;
                        text.font_size = LABEL_FONT_SIZE;
                        text.font_family = LABEL_FONT_FAMILY.to_string();
                        text.visible = true;
                    }
                }
            },
            |scene, nodes| {
                scene.remove(nodes.rect);
                scene.remove(nodes.label);
            },
        );

        debug!(
            bars = records.len(),
            entered = stats.entered,
            updated = stats.updated,
            exited = stats.exited,
            "bar series layout applied"
        );
    }
}
