//! SVG generation from layout results

use crate::layout::{
    CompositeShape, LayoutResult, OpeningKind, PlacedObject, PlacedOpening, Point, Rect, Segment,
    SwingArc,
};
use crate::model::ObjectShape;
use crate::stylesheet::Stylesheet;

use super::SvgConfig;

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    styles: Vec<String>,
    elements: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            styles: vec![],
            elements: vec![],
            indent: 1,
        }
    }

    /// Add CSS custom properties from a stylesheet, plus the class rules
    /// that consume them
    pub fn add_stylesheet(&mut self, stylesheet: &Stylesheet) {
        let mut css = String::from(":root {\n");
        for (token, value) in &stylesheet.colors {
            css.push_str(&format!("    --{}: {};\n", token, value));
        }
        css.push_str("  }");
        self.styles.push(css);

        let p = self.prefix();
        let wall = self.config.wall_stroke_width;
        let detail = self.config.detail_stroke_width;
        let font_size = self.config.font_size;
        let font_family = if stylesheet.colors.contains_key("font-family") {
            " font-family: var(--font-family);"
        } else {
            ""
        };
        self.styles.extend([
            format!(".{p}room-fill {{ fill: var(--room-fill); stroke: none; }}"),
            format!(".{p}part-fill {{ fill: var(--part-fill); stroke: none; }}"),
            format!(".{p}wall {{ stroke: var(--wall); stroke-width: {wall}; stroke-linecap: square; }}"),
            format!(".{p}opening {{ fill: var(--background); stroke: none; }}"),
            format!(".{p}door-leaf {{ stroke: var(--door); stroke-width: {detail}; }}"),
            format!(
                ".{p}door-swing {{ fill: none; stroke: var(--door-swing); stroke-width: {detail}; }}"
            ),
            format!(".{p}window-pane {{ stroke: var(--window); stroke-width: {detail}; }}"),
            format!(".{p}object {{ fill: var(--object); }}"),
            format!(".{p}label {{ fill: var(--label); font-size: {font_size}px;{font_family} }}"),
        ]);
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn class_list(&self, classes: &[&str]) -> String {
        let prefix = self.prefix();
        classes
            .iter()
            .map(|c| format!("{}{}", prefix, c))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add a rectangle element
    pub fn add_rect(&mut self, rect: &Rect, classes: &[&str], styles: &str) {
        self.elements.push(format!(
            r#"{}<rect class="{}" x="{}" y="{}" width="{}" height="{}"{}/>"#,
            self.indent_str(),
            self.class_list(classes),
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            styles
        ));
    }

    /// Add a circle element
    pub fn add_circle(&mut self, center: Point, r: f64, classes: &[&str], styles: &str) {
        self.elements.push(format!(
            r#"{}<circle class="{}" cx="{}" cy="{}" r="{}"{}/>"#,
            self.indent_str(),
            self.class_list(classes),
            center.x,
            center.y,
            r,
            styles
        ));
    }

    /// Add a closed polygon element
    pub fn add_polygon(&mut self, points: &[Point], classes: &[&str]) {
        let points_str: String = points
            .iter()
            .map(|p| format!("{},{}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");

        self.elements.push(format!(
            r#"{}<polygon class="{}" points="{}"/>"#,
            self.indent_str(),
            self.class_list(classes),
            points_str
        ));
    }

    /// Add a line element
    pub fn add_line(&mut self, segment: &Segment, classes: &[&str]) {
        self.elements.push(format!(
            r#"{}<line class="{}" x1="{}" y1="{}" x2="{}" y2="{}"/>"#,
            self.indent_str(),
            self.class_list(classes),
            segment.start.x,
            segment.start.y,
            segment.end.x,
            segment.end.y
        ));
    }

    /// Add a path element
    pub fn add_path(&mut self, d: &str, classes: &[&str]) {
        self.elements.push(format!(
            r#"{}<path class="{}" d="{}"/>"#,
            self.indent_str(),
            self.class_list(classes),
            d
        ));
    }

    /// Add a centered text element
    pub fn add_text(&mut self, text: &str, at: Point, classes: &[&str]) {
        self.elements.push(format!(
            r#"{}<text class="{}" x="{}" y="{}" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
            self.indent_str(),
            self.class_list(classes),
            at.x,
            at.y,
            escape_xml(text)
        ));
    }

    /// Add a group element with an id and classes
    pub fn start_group(&mut self, id: &str, classes: &[&str]) {
        let class_attr = if classes.is_empty() {
            String::new()
        } else {
            format!(r#" class="{}""#, self.class_list(classes))
        };

        self.elements.push(format!(
            r#"{}<g id="{}"{}>"#,
            self.indent_str(),
            escape_xml(id),
            class_attr
        ));
        self.indent += 1;
    }

    /// Close a group element
    pub fn end_group(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.elements.push(format!("{}</g>", self.indent_str()));
    }

    /// Build the final SVG string
    pub fn build(self, viewbox: Rect) -> String {
        let nl = self.newline();
        let scale = self.config.scale;

        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" width="{}" height="{}">"#,
            viewbox.x,
            viewbox.y,
            viewbox.width,
            viewbox.height,
            viewbox.width * scale,
            viewbox.height * scale
        ));
        svg.push_str(nl);

        if !self.styles.is_empty() {
            svg.push_str("  <style>");
            svg.push_str(nl);
            for style in &self.styles {
                svg.push_str("  ");
                svg.push_str(style);
                svg.push_str(nl);
            }
            svg.push_str("  </style>");
            svg.push_str(nl);
        }

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Render a LayoutResult to an SVG string
pub fn render_svg(result: &LayoutResult, config: &SvgConfig, stylesheet: &Stylesheet) -> String {
    let mut builder = SvgBuilder::new(config.clone());
    builder.add_stylesheet(stylesheet);

    for (room_id, composite) in &result.composites {
        let label = result
            .rooms
            .get(room_id)
            .map(|r| (r.name.as_deref().unwrap_or(&r.id), r.rect.center()));
        let objects = result.objects.iter().filter(|o| hosted_by(&o.host, room_id));
        render_room(&mut builder, room_id, composite, label, objects, config);
    }

    for opening in &result.openings {
        render_opening(&mut builder, opening);
    }

    builder.build(result.bounds)
}

/// Whether `host` is the room itself or one of its parts
fn hosted_by(host: &str, room_id: &str) -> bool {
    host == room_id
        || host
            .strip_prefix(room_id)
            .is_some_and(|rest| rest.starts_with('.'))
}

fn render_room<'a>(
    builder: &mut SvgBuilder,
    room_id: &str,
    composite: &CompositeShape,
    label: Option<(&str, Point)>,
    objects: impl Iterator<Item = &'a PlacedObject>,
    config: &SvgConfig,
) {
    builder.start_group(&format!("room-{}", room_id), &["room"]);

    // fills first so walls of one member are never painted over by another
    for (i, rect) in composite.rectangles.iter().enumerate() {
        let fill = if i == 0 { "room-fill" } else { "part-fill" };
        builder.add_rect(rect, &[fill], "");
    }
    for segment in composite.outline() {
        builder.add_line(&segment, &["wall"]);
    }
    if config.debug {
        for segment in &composite.shared_edges {
            builder.add_line(segment, &["shared-edge"]);
        }
    }

    for object in objects {
        render_object(builder, object);
    }

    if config.show_labels {
        if let Some((text, center)) = label {
            builder.add_text(text, center, &["label"]);
        }
    }

    builder.end_group();
}

fn render_object(builder: &mut SvgBuilder, object: &PlacedObject) {
    let styles = object
        .color
        .as_ref()
        .map(|c| format!(r#" fill="{}""#, escape_xml(c)))
        .unwrap_or_default();

    match object.shape {
        ObjectShape::Square => builder.add_rect(&object.rect, &["object"], &styles),
        ObjectShape::Circle => {
            let r = object.rect.width.min(object.rect.height) / 2.0;
            builder.add_circle(object.rect.center(), r, &["object"], &styles);
        }
    }

    if let Some(text) = &object.text {
        builder.add_text(text, object.rect.center(), &["label", "object-label"]);
    }
}

fn render_opening(builder: &mut SvgBuilder, opening: &PlacedOpening) {
    let kind = match opening.kind {
        OpeningKind::Door => "door",
        OpeningKind::Window => "window",
    };
    builder.start_group(&opening.element_id(), &[kind]);

    let geometry = &opening.geometry;
    builder.add_polygon(&geometry.outline, &["opening"]);
    if let Some(leaf) = &geometry.leaf {
        builder.add_line(leaf, &["door-leaf"]);
    }
    if let Some(arc) = &geometry.arc {
        builder.add_path(&arc_to_d(arc), &["door-swing"]);
    }
    if let Some(pane) = &geometry.pane {
        builder.add_line(pane, &["window-pane"]);
    }

    builder.end_group();
}

/// Convert a swing arc to an SVG path d attribute
fn arc_to_d(arc: &SwingArc) -> String {
    format!(
        "M{} {} A{} {} 0 0 {} {} {}",
        arc.start.x,
        arc.start.y,
        arc.radius,
        arc.radius,
        u8::from(arc.sweep),
        arc.end.x,
        arc.end.y
    )
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
