//! Path recording for the sketch context.
//!
//! `move_to`/`line_to`/curve calls on the context are not drawn right away;
//! they are collected here and turned into vertex lists when the path is
//! filled or stroked.

use lyon_geom::{CubicBezierSegment, QuadraticBezierSegment, point};

use crate::geometry::Point;

/// Tolerance for curve flattening, in drawing units.
pub const CURVE_TOLERANCE: f64 = 0.1;

/// One recorded path command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    BezierTo { ctrl1: Point, ctrl2: Point, to: Point },
    QuadTo { ctrl: Point, to: Point },
}

impl PathCommand {
    /// The pen position after this command.
    pub fn cursor(&self) -> Point {
        match *self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => p,
            PathCommand::BezierTo { to, .. } | PathCommand::QuadTo { to, .. } => to,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PathRecorder {
    commands: Vec<PathCommand>,
}

impl PathRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn push(&mut self, command: PathCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn first_cursor(&self) -> Option<Point> {
        self.commands.first().map(PathCommand::cursor)
    }

    pub fn last_cursor(&self) -> Option<Point> {
        self.commands.last().map(PathCommand::cursor)
    }

    /// Split the recording into vertex lists, one per `MoveTo`.
    ///
    /// Curves are flattened to line segments within `tolerance`. Commands
    /// before the first `MoveTo` open an implicit subpath at their own start.
    /// Consecutive duplicate vertices are dropped.
    pub fn subpaths(&self, tolerance: f64) -> Vec<Vec<Point>> {
        let mut subpaths: Vec<Vec<Point>> = Vec::new();
        let mut current: Vec<Point> = Vec::new();

        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) => {
                    if !current.is_empty() {
                        subpaths.push(std::mem::take(&mut current));
                    }
                    current.push(p);
                }
                PathCommand::LineTo(p) => current.push(p),
                PathCommand::BezierTo { ctrl1, ctrl2, to } => {
                    let Some(&from) = current.last() else {
                        current.push(to);
                        continue;
                    };
                    let curve = CubicBezierSegment {
                        from: point(from.x, from.y),
                        ctrl1: point(ctrl1.x, ctrl1.y),
                        ctrl2: point(ctrl2.x, ctrl2.y),
                        to: point(to.x, to.y),
                    };
                    curve.for_each_flattened(tolerance, &mut |segment| {
                        current.push(Point::new(segment.to.x, segment.to.y));
                    });
                }
                PathCommand::QuadTo { ctrl, to } => {
                    let Some(&from) = current.last() else {
                        current.push(to);
                        continue;
                    };
                    let curve = QuadraticBezierSegment {
                        from: point(from.x, from.y),
                        ctrl: point(ctrl.x, ctrl.y),
                        to: point(to.x, to.y),
                    };
                    curve.for_each_flattened(tolerance, &mut |segment| {
                        current.push(Point::new(segment.to.x, segment.to.y));
                    });
                }
            }
        }

        if !current.is_empty() {
            subpaths.push(current);
        }

        for points in &mut subpaths {
            points.dedup_by(|a, b| (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9);
        }

        subpaths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_move_to() {
        let mut path = PathRecorder::new();
        path.push(PathCommand::MoveTo(Point::new(0.0, 0.0)));
        path.push(PathCommand::LineTo(Point::new(10.0, 0.0)));
        path.push(PathCommand::LineTo(Point::new(10.0, 10.0)));
        path.push(PathCommand::MoveTo(Point::new(20.0, 20.0)));
        path.push(PathCommand::LineTo(Point::new(30.0, 20.0)));

        let subpaths = path.subpaths(CURVE_TOLERANCE);
        assert_eq!(subpaths.len(), 2);
        assert_eq!(subpaths[0].len(), 3);
        assert_eq!(subpaths[1], vec![Point::new(20.0, 20.0), Point::new(30.0, 20.0)]);
    }

    #[test]
    fn curves_are_flattened() {
        let mut path = PathRecorder::new();
        path.push(PathCommand::MoveTo(Point::new(0.0, 0.0)));
        path.push(PathCommand::BezierTo {
            ctrl1: Point::new(0.0, 50.0),
            ctrl2: Point::new(100.0, 50.0),
            to: Point::new(100.0, 0.0),
        });
        path.push(PathCommand::QuadTo {
            ctrl: Point::new(50.0, -50.0),
            to: Point::new(0.0, 0.0),
        });

        let subpaths = path.subpaths(CURVE_TOLERANCE);
        assert_eq!(subpaths.len(), 1);
        let points = &subpaths[0];
        assert!(points.len() > 10, "expected flattened curve, got {} points", points.len());
        assert!(points.iter().any(|p| p.distance(Point::new(100.0, 0.0)) < 1e-6));
    }

    #[test]
    fn leading_line_to_opens_a_subpath() {
        let mut path = PathRecorder::new();
        path.push(PathCommand::LineTo(Point::new(1.0, 1.0)));
        path.push(PathCommand::LineTo(Point::new(2.0, 1.0)));
        assert_eq!(path.subpaths(CURVE_TOLERANCE), vec![vec![Point::new(1.0, 1.0), Point::new(2.0, 1.0)]]);
    }

    #[test]
    fn duplicate_vertices_are_dropped() {
        let mut path = PathRecorder::new();
        path.push(PathCommand::MoveTo(Point::new(1.0, 1.0)));
        path.push(PathCommand::LineTo(Point::new(1.0, 1.0)));
        path.push(PathCommand::LineTo(Point::new(4.0, 1.0)));
        assert_eq!(path.subpaths(CURVE_TOLERANCE)[0].len(), 2);
    }

    #[test]
    fn cursors_track_command_endpoints() {
        let mut path = PathRecorder::new();
        assert_eq!(path.first_cursor(), None);
        path.push(PathCommand::MoveTo(Point::new(1.0, 2.0)));
        path.push(PathCommand::QuadTo { ctrl: Point::new(5.0, 5.0), to: Point::new(9.0, 2.0) });
        assert_eq!(path.first_cursor(), Some(Point::new(1.0, 2.0)));
        assert_eq!(path.last_cursor(), Some(Point::new(9.0, 2.0)));
    }
}
