//! In-memory drawing backend that records primitives for assertions.

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use plotters_backend::{
    BackendColor, BackendCoord, BackendStyle, BackendTextStyle, DrawingBackend, DrawingErrorKind,
};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text { text: String, color: (u8, u8, u8), pos: BackendCoord },
    Polygon { color: (u8, u8, u8), alpha: f64, vertices: Vec<BackendCoord> },
    Path { color: (u8, u8, u8), points: usize },
    Circle { center: BackendCoord, color: (u8, u8, u8), fill: bool },
    Rect { color: (u8, u8, u8), fill: bool },
    Line,
}

pub struct RecordingBackend {
    size: (u32, u32),
    ops: Rc<RefCell<Vec<DrawOp>>>,
}

impl RecordingBackend {
    pub fn new(width: u32, height: u32) -> (Self, Rc<RefCell<Vec<DrawOp>>>) {
        let ops = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                size: (width, height),
                ops: ops.clone(),
            },
            ops,
        )
    }

    fn record(&self, op: DrawOp) {
        self.ops.borrow_mut().push(op);
    }
}

fn rgb(color: BackendColor) -> (u8, u8, u8) {
    color.rgb
}

impl DrawingBackend for RecordingBackend {
    type ErrorType = Infallible;

    fn get_size(&self) -> (u32, u32) {
        self.size
    }

    fn ensure_prepared(&mut self) -> Result<(), DrawingErrorKind<Infallible>> {
        Ok(())
    }

    fn present(&mut self) -> Result<(), DrawingErrorKind<Infallible>> {
        Ok(())
    }

    fn draw_pixel(&mut self, _point: BackendCoord, _color: BackendColor) -> Result<(), DrawingErrorKind<Infallible>> {
        Ok(())
    }

    fn draw_line<S: BackendStyle>(
        &mut self,
        _from: BackendCoord,
        _to: BackendCoord,
        _style: &S,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        self.record(DrawOp::Line);
        Ok(())
    }

    fn draw_rect<S: BackendStyle>(
        &mut self,
        _upper_left: BackendCoord,
        _bottom_right: BackendCoord,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        self.record(DrawOp::Rect {
            color: rgb(style.color()),
            fill,
        });
        Ok(())
    }

    fn draw_path<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        path: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        self.record(DrawOp::Path {
            color: rgb(style.color()),
            points: path.into_iter().count(),
        });
        Ok(())
    }

    fn draw_circle<S: BackendStyle>(
        &mut self,
        center: BackendCoord,
        _radius: u32,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        self.record(DrawOp::Circle {
            center,
            color: rgb(style.color()),
            fill,
        });
        Ok(())
    }

    fn fill_polygon<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        vert: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        let color = style.color();
        self.record(DrawOp::Polygon {
            color: rgb(color),
            alpha: color.alpha,
            vertices: vert.into_iter().collect(),
        });
        Ok(())
    }

    fn draw_text<TStyle: BackendTextStyle>(
        &mut self,
        text: &str,
        style: &TStyle,
        pos: BackendCoord,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        self.record(DrawOp::Text {
            text: text.to_string(),
            color: rgb(style.color()),
            pos,
        });
        Ok(())
    }

    fn estimate_text_size<TStyle: BackendTextStyle>(
        &self,
        text: &str,
        style: &TStyle,
    ) -> Result<(u32, u32), DrawingErrorKind<Infallible>> {
        let size = style.size();
        Ok(((text.chars().count() as f64 * size * 0.6) as u32, size as u32))
    }
}

/// Text of every recorded text primitive, in draw order
pub fn texts(ops: &[DrawOp]) -> Vec<String> {
    ops.iter()
        .filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect()
}
