//! Sheet document
//!
//! An in-memory [`DrawingDocument`]: a tree of transformed groups, each
//! holding its shapes and child groups in the order they were added. The
//! renderer walks the tree as-is; the query helpers resolve local geometry
//! into sheet coordinates.

use enclosurekit_core::error::ensure_finite;
use enclosurekit_core::{
    DocumentError, DrawingDocument, EdgeMask, GeometryError, GroupId, Path, Point, Rect, Result,
    Style, TextFormat, Transform,
};

/// Geometry of one element, in its group's local frame.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Path(Path),
    Rect { rect: Rect, edges: EdgeMask },
    RoundRect { rect: Rect, radius: f64 },
    Hole { centre: Point, radius: f64 },
    Circle { centre: Point, radius: f64 },
    /// Clockwise arc, clock-convention angles.
    Arc {
        centre: Point,
        radius: f64,
        start_deg: f64,
        end_deg: f64,
    },
    Text {
        at: Point,
        text: String,
        format: TextFormat,
    },
}

/// A styled element on the sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetShape {
    pub kind: ShapeKind,
    pub style: Style,
}

/// Entry in a group's content list.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupItem {
    Group(GroupId),
    Shape(SheetShape),
}

#[derive(Debug, Clone)]
pub struct SheetGroup {
    pub parent: Option<GroupId>,
    pub transform: Transform,
    pub items: Vec<GroupItem>,
}

/// A hole resolved into sheet coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedHole {
    pub centre: Point,
    pub radius: f64,
    pub style: Style,
}

/// Drawing surface for one laser-cut sheet.
#[derive(Debug, Clone)]
pub struct SheetDocument {
    width: f64,
    height: f64,
    groups: Vec<SheetGroup>,
}

impl SheetDocument {
    /// Creates an empty sheet of `width` x `height` mm.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            groups: vec![SheetGroup {
                parent: None,
                transform: Transform::identity(),
                items: Vec::new(),
            }],
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    pub fn group(&self, id: GroupId) -> Result<&SheetGroup> {
        self.groups
            .get(id.0)
            .ok_or_else(|| DocumentError::UnknownGroup { id: id.0 }.into())
    }

    fn group_mut(&mut self, id: GroupId) -> Result<&mut SheetGroup> {
        self.groups
            .get_mut(id.0)
            .ok_or_else(|| DocumentError::UnknownGroup { id: id.0 }.into())
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Transform from `id`'s local frame to sheet coordinates.
    pub fn global_transform(&self, id: GroupId) -> Result<Transform> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(gid) = current {
            let group = self.group(gid)?;
            chain.push(group.transform.clone());
            current = group.parent;
        }
        Ok(chain
            .into_iter()
            .rev()
            .fold(Transform::identity(), Transform::then))
    }

    /// Every shape on the sheet with the group it belongs to, depth first.
    pub fn shapes(&self) -> Vec<(GroupId, &SheetShape)> {
        let mut out = Vec::new();
        self.collect_shapes(self.root(), &mut out);
        out
    }

    fn collect_shapes<'a>(&'a self, id: GroupId, out: &mut Vec<(GroupId, &'a SheetShape)>) {
        let Some(group) = self.groups.get(id.0) else {
            return;
        };
        for item in &group.items {
            match item {
                GroupItem::Group(child) => self.collect_shapes(*child, out),
                GroupItem::Shape(shape) => out.push((id, shape)),
            }
        }
    }

    pub fn count_style(&self, style: Style) -> usize {
        self.shapes().iter().filter(|(_, s)| s.style == style).count()
    }

    /// Every hole, with its centre in sheet coordinates.
    pub fn holes(&self) -> Result<Vec<PlacedHole>> {
        let mut holes = Vec::new();
        for (group, shape) in self.shapes() {
            if let ShapeKind::Hole { centre, radius } = shape.kind {
                let transform = self.global_transform(group)?;
                holes.push(PlacedHole {
                    centre: transform.apply(centre),
                    radius,
                    style: shape.style,
                });
            }
        }
        Ok(holes)
    }

    /// Text of every annotation, in drawing order.
    pub fn texts(&self) -> Vec<&str> {
        self.shapes()
            .into_iter()
            .filter_map(|(_, shape)| match &shape.kind {
                ShapeKind::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn push(&mut self, group: GroupId, kind: ShapeKind, style: Style) -> Result<()> {
        self.group_mut(group)?
            .items
            .push(GroupItem::Shape(SheetShape { kind, style }));
        Ok(())
    }
}

fn check_point(what: &'static str, p: Point) -> std::result::Result<(), GeometryError> {
    ensure_finite(what, p.x)?;
    ensure_finite(what, p.y)?;
    Ok(())
}

fn check_radius(radius: f64) -> std::result::Result<(), GeometryError> {
    if radius > 0.0 && radius.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::NonPositiveRadius { radius })
    }
}

fn check_rect(rect: Rect) -> std::result::Result<(), GeometryError> {
    check_point("rect origin", rect.min())?;
    if rect.width > 0.0 && rect.height > 0.0 && rect.width.is_finite() && rect.height.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::EmptyRect {
            width: rect.width,
            height: rect.height,
        })
    }
}

impl DrawingDocument for SheetDocument {
    fn root(&self) -> GroupId {
        GroupId(0)
    }

    fn create_group(&mut self, parent: GroupId, transform: Transform) -> Result<GroupId> {
        self.group(parent)?;
        let id = GroupId(self.groups.len());
        self.groups.push(SheetGroup {
            parent: Some(parent),
            transform,
            items: Vec::new(),
        });
        self.group_mut(parent)?.items.push(GroupItem::Group(id));
        Ok(id)
    }

    fn add_path(&mut self, group: GroupId, path: &Path, style: Style) -> Result<()> {
        path.validate()?;
        self.push(group, ShapeKind::Path(path.clone()), style)
    }

    fn add_rect(
        &mut self,
        group: GroupId,
        rect: Rect,
        style: Style,
        edges: EdgeMask,
    ) -> Result<()> {
        check_rect(rect)?;
        self.push(group, ShapeKind::Rect { rect, edges }, style)
    }

    fn add_round_rect(
        &mut self,
        group: GroupId,
        rect: Rect,
        radius: f64,
        style: Style,
    ) -> Result<()> {
        check_rect(rect)?;
        check_radius(radius)?;
        self.push(group, ShapeKind::RoundRect { rect, radius }, style)
    }

    fn add_hole(&mut self, group: GroupId, centre: Point, radius: f64, style: Style) -> Result<()> {
        check_point("hole centre", centre)?;
        check_radius(radius)?;
        self.push(group, ShapeKind::Hole { centre, radius }, style)
    }

    fn add_circle(
        &mut self,
        group: GroupId,
        centre: Point,
        radius: f64,
        style: Style,
    ) -> Result<()> {
        check_point("circle centre", centre)?;
        check_radius(radius)?;
        self.push(group, ShapeKind::Circle { centre, radius }, style)
    }

    fn add_arc(
        &mut self,
        group: GroupId,
        centre: Point,
        radius: f64,
        start_deg: f64,
        end_deg: f64,
        style: Style,
    ) -> Result<()> {
        check_point("arc centre", centre)?;
        check_radius(radius)?;
        ensure_finite("arc start angle", start_deg)?;
        ensure_finite("arc end angle", end_deg)?;
        self.push(
            group,
            ShapeKind::Arc {
                centre,
                radius,
                start_deg,
                end_deg,
            },
            style,
        )
    }

    fn add_annotation(
        &mut self,
        group: GroupId,
        at: Point,
        text: &str,
        format: TextFormat,
    ) -> Result<()> {
        check_point("annotation anchor", at)?;
        self.push(
            group,
            ShapeKind::Text {
                at,
                text: text.to_string(),
                format,
            },
            format.style,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enclosurekit_core::{Error, EPSILON};

    #[test]
    fn test_nested_group_transforms() {
        let mut doc = SheetDocument::new(210.0, 297.0);
        let margin = doc
            .create_group(doc.root(), Transform::translate(8.0, 8.0))
            .unwrap();
        let panel = doc
            .create_group(margin, Transform::translate(10.0, 0.0).then(Transform::rotate(-90.0)))
            .unwrap();

        let p = doc
            .global_transform(panel)
            .unwrap()
            .apply(Point::new(1.0, 0.0));
        assert!(p.approx_eq(Point::new(18.0, 9.0), EPSILON), "{p}");
        assert_eq!(doc.group_count(), 3);
    }

    #[test]
    fn test_holes_are_reported_in_sheet_coordinates() {
        let mut doc = SheetDocument::new(100.0, 100.0);
        let g = doc
            .create_group(doc.root(), Transform::translate(5.0, 7.0))
            .unwrap();
        doc.add_hole(g, Point::new(1.0, 1.0), 1.5, Style::Cut).unwrap();
        doc.add_circle(g, Point::new(1.0, 1.0), 1.5, Style::Ignore).unwrap();

        let holes = doc.holes().unwrap();
        assert_eq!(holes.len(), 1);
        assert!(holes[0].centre.approx_eq(Point::new(6.0, 8.0), EPSILON));
        assert_eq!(doc.count_style(Style::Ignore), 1);
    }

    #[test]
    fn test_unknown_group() {
        let mut doc = SheetDocument::new(100.0, 100.0);
        let err = doc
            .add_hole(GroupId(4), Point::ORIGIN, 1.0, Style::Cut)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Document(DocumentError::UnknownGroup { id: 4 })
        ));
        assert!(doc.create_group(GroupId(9), Transform::identity()).is_err());
    }

    #[test]
    fn test_rejects_degenerate_primitives() {
        let mut doc = SheetDocument::new(100.0, 100.0);
        let root = doc.root();
        assert!(doc
            .add_rect(root, Rect::new(0.0, 0.0, 0.0, 5.0), Style::Cut, EdgeMask::ALL)
            .is_err());
        assert!(doc
            .add_circle(root, Point::ORIGIN, -1.0, Style::Cut)
            .is_err());
        assert!(doc
            .add_arc(root, Point::new(f64::NAN, 0.0), 1.0, 0.0, 90.0, Style::Etch)
            .is_err());
        assert!(doc.shapes().is_empty());
    }

    #[test]
    fn test_items_keep_insertion_order() {
        let mut doc = SheetDocument::new(100.0, 100.0);
        let root = doc.root();
        doc.add_annotation(root, Point::ORIGIN, "first", TextFormat::default())
            .unwrap();
        let child = doc.create_group(root, Transform::identity()).unwrap();
        doc.add_annotation(child, Point::ORIGIN, "second", TextFormat::default())
            .unwrap();
        doc.add_annotation(root, Point::ORIGIN, "third", TextFormat::default())
            .unwrap();
        assert_eq!(doc.texts(), vec!["first", "second", "third"]);
    }
}
