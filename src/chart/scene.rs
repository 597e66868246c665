//! Vector scene primitives.
//!
//! A chart is composed as a structured list of drawing nodes and handed to
//! the SVG serializer in one step, keeping geometry and formatting apart
//! from markup escaping.

/// Fill paint: a flat color or a reference to a gradient definition.
#[derive(Debug, Clone)]
pub enum Paint {
    Color(String),
    GradientRef(String),
}

impl Paint {
    pub fn color(c: &str) -> Self {
        Paint::Color(c.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
}

impl Stroke {
    pub fn new(color: &str, width: f64) -> Self {
        Stroke {
            color: color.to_string(),
            width,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    Bold,
}

#[derive(Debug, Clone)]
pub enum PathCommand {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Close,
}

/// Two-stop vertical linear gradient, used for the area fill under the line.
#[derive(Debug, Clone)]
pub struct GradientDef {
    pub id: String,
    pub color: String,
    pub top_opacity: f64,
    pub bottom_opacity: f64,
}

/// One drawing primitive in z-order.
#[derive(Debug, Clone)]
pub enum SceneNode {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Option<Paint>,
        stroke: Option<Stroke>,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: Stroke,
    },
    Path {
        commands: Vec<PathCommand>,
        fill: Option<Paint>,
        stroke: Option<Stroke>,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        fill: Paint,
        stroke: Option<Stroke>,
    },
    Text {
        x: f64,
        y: f64,
        content: String,
        anchor: TextAnchor,
        size: f64,
        weight: FontWeight,
        color: String,
    },
    /// Children share a stroke and opacity (gridlines and their labels)
    Group {
        stroke: Option<Stroke>,
        opacity: Option<f64>,
        children: Vec<SceneNode>,
    },
}

/// The complete resolution-independent drawing, built and consumed within a
/// single render call.
#[derive(Debug, Clone)]
pub struct VectorScene {
    pub width: u32,
    pub height: u32,
    pub defs: Vec<GradientDef>,
    pub nodes: Vec<SceneNode>,
}

impl VectorScene {
    pub fn new(width: u32, height: u32) -> Self {
        VectorScene {
            width,
            height,
            defs: Vec::new(),
            nodes: Vec::new(),
        }
    }

    pub fn push(&mut self, node: SceneNode) {
        self.nodes.push(node);
    }

    pub fn define_gradient(&mut self, def: GradientDef) {
        self.defs.push(def);
    }
}

/// Build a polyline path through the given points, in order.
pub fn polyline(points: impl IntoIterator<Item = (f64, f64)>) -> Vec<PathCommand> {
    let mut commands = Vec::new();
    for (i, (x, y)) in points.into_iter().enumerate() {
        if i == 0 {
            commands.push(PathCommand::MoveTo(x, y));
        } else {
            commands.push(PathCommand::LineTo(x, y));
        }
    }
    commands
}
