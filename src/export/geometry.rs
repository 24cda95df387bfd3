use crate::graph::{Edge, HandleRole, Node, Position, Side};

/// Distance an edge travels straight out of a handle before it turns.
pub const EDGE_STUB: f64 = 20.0;

/// An axis-aligned rectangle in diagram space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn of_node(node: &Node) -> Self {
        let footprint = node.footprint();
        Self {
            x: node.position.x,
            y: node.position.y,
            width: footprint.width,
            height: footprint.height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Position {
        Position::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn union(self, other: Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }

    pub fn inflate(self, amount: f64) -> Rect {
        Rect {
            x: self.x - amount,
            y: self.y - amount,
            width: self.width + amount * 2.0,
            height: self.height + amount * 2.0,
        }
    }

    /// Midpoint of one side; for a diamond this is also the matching vertex.
    pub fn anchor(&self, side: Side) -> Position {
        let center = self.center();
        match side {
            Side::Top => Position::new(center.x, self.y),
            Side::Right => Position::new(self.right(), center.y),
            Side::Bottom => Position::new(center.x, self.bottom()),
            Side::Left => Position::new(self.x, center.y),
        }
    }
}

/// The smallest rectangle enclosing every node's footprint, or `None` for no nodes.
pub fn content_bounds<'a, I>(nodes: I) -> Option<Rect>
where
    I: IntoIterator<Item = &'a Node>,
{
    nodes.into_iter().map(Rect::of_node).reduce(Rect::union)
}

fn outward(side: Side) -> (f64, f64) {
    match side {
        Side::Top => (0.0, -1.0),
        Side::Right => (1.0, 0.0),
        Side::Bottom => (0.0, 1.0),
        Side::Left => (-1.0, 0.0),
    }
}

/// The side an edge leaves its source from. Handle ids the kind does not declare
/// fall back to the kind's unnamed source handle, then to the bottom.
pub fn source_side(node: &Node, handle: Option<&str>) -> Side {
    node.kind
        .source_handle(handle)
        .or_else(|| node.kind.source_handle(None))
        .map(|h| h.side)
        .unwrap_or(Side::Bottom)
}

pub fn target_side(node: &Node) -> Side {
    node.kind
        .handles()
        .iter()
        .find(|h| h.role == HandleRole::Target)
        .map(|h| h.side)
        .unwrap_or(Side::Top)
}

/// An orthogonal ("smooth step") route between two handle anchors.
pub fn edge_route(edge: &Edge, source: &Node, target: &Node) -> Vec<Position> {
    let from_side = source_side(source, edge.source_handle.as_deref());
    let to_side = target_side(target);
    let start = Rect::of_node(source).anchor(from_side);
    let end = Rect::of_node(target).anchor(to_side);

    let (sx, sy) = outward(from_side);
    let (tx, ty) = outward(to_side);
    let leave = start.offset(sx * EDGE_STUB, sy * EDGE_STUB);
    let arrive = end.offset(tx * EDGE_STUB, ty * EDGE_STUB);

    let mut route = vec![start, leave];
    match from_side {
        Side::Top | Side::Bottom => {
            let mid_y = (leave.y + arrive.y) / 2.0;
            route.push(Position::new(leave.x, mid_y));
            route.push(Position::new(arrive.x, mid_y));
        }
        Side::Left | Side::Right => {
            let mid_x = (leave.x + arrive.x) / 2.0;
            route.push(Position::new(mid_x, leave.y));
            route.push(Position::new(mid_x, arrive.y));
        }
    }
    route.push(arrive);
    route.push(end);
    route.dedup();
    route
}

/// Where an edge label sits: the middle of the route's middle segment.
pub fn label_anchor(route: &[Position]) -> Option<Position> {
    match route.len() {
        0 => None,
        1 => route.first().copied(),
        len => {
            let a = route[len / 2 - 1];
            let b = route[len / 2];
            Some(Position::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0))
        }
    }
}
