//! Conversion logic between DTOs and domain entities.
//!
//! DTO → domain conversions validate every field: this is the only place
//! client-supplied geometry enters the domain.

use crate::domain::{
    Action, BrushSize, Color, Composite, LiveSegment, Point, RoomEvent, Shape, ShapeGeometry,
    Stroke, StrokeTool, TextContent, TextLabel, ValueObjectError,
};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// DTO → Domain Entity
// ========================================

impl TryFrom<dto::PointDto> for Point {
    type Error = ValueObjectError;

    fn try_from(dto: dto::PointDto) -> Result<Self, Self::Error> {
        Point::new(dto.x, dto.y)
    }
}

impl From<dto::StrokeToolDto> for StrokeTool {
    fn from(dto: dto::StrokeToolDto) -> Self {
        match dto {
            dto::StrokeToolDto::Pen => StrokeTool::Pen,
            dto::StrokeToolDto::Eraser => StrokeTool::Eraser,
        }
    }
}

impl From<dto::CompositeDto> for Composite {
    fn from(dto: dto::CompositeDto) -> Self {
        match dto {
            dto::CompositeDto::SourceOver => Composite::SourceOver,
            dto::CompositeDto::DestinationOut => Composite::DestinationOut,
        }
    }
}

impl TryFrom<dto::StrokeDto> for Stroke {
    type Error = ValueObjectError;

    fn try_from(dto: dto::StrokeDto) -> Result<Self, Self::Error> {
        let points = dto
            .points
            .into_iter()
            .map(Point::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Stroke::new(
            dto.tool.into(),
            Color::new(dto.color)?,
            BrushSize::new(dto.size)?,
            points,
        )
    }
}

impl TryFrom<dto::ShapeGeometryDto> for ShapeGeometry {
    type Error = ValueObjectError;

    fn try_from(dto: dto::ShapeGeometryDto) -> Result<Self, Self::Error> {
        match dto {
            dto::ShapeGeometryDto::Rect { x, y, w, h } => ShapeGeometry::rect(x, y, w, h),
            dto::ShapeGeometryDto::Circle { cx, cy, r } => ShapeGeometry::circle(cx, cy, r),
            dto::ShapeGeometryDto::Line { x1, y1, x2, y2 } => ShapeGeometry::line(x1, y1, x2, y2),
        }
    }
}

impl TryFrom<dto::ShapeDto> for Shape {
    type Error = ValueObjectError;

    fn try_from(dto: dto::ShapeDto) -> Result<Self, Self::Error> {
        Ok(Shape {
            color: Color::new(dto.color)?,
            size: BrushSize::new(dto.size)?,
            geometry: dto.geometry.try_into()?,
        })
    }
}

impl TryFrom<dto::TextDto> for TextLabel {
    type Error = ValueObjectError;

    fn try_from(dto: dto::TextDto) -> Result<Self, Self::Error> {
        Ok(TextLabel {
            position: Point::new(dto.x, dto.y)?,
            text: TextContent::new(dto.text)?,
            color: Color::new(dto.color)?,
            size: BrushSize::new(dto.size)?,
        })
    }
}

impl TryFrom<dto::SegmentDto> for LiveSegment {
    type Error = ValueObjectError;

    fn try_from(dto: dto::SegmentDto) -> Result<Self, Self::Error> {
        Ok(LiveSegment {
            from: Point::new(dto.x1, dto.y1)?,
            to: Point::new(dto.x2, dto.y2)?,
            color: Color::new(dto.color)?,
            size: BrushSize::new(dto.size)?,
            composite: dto.composite.into(),
        })
    }
}

impl TryFrom<dto::ActionDto> for Action {
    type Error = ValueObjectError;

    fn try_from(dto: dto::ActionDto) -> Result<Self, Self::Error> {
        Ok(match dto {
            dto::ActionDto::Stroke(stroke) => Action::Stroke(stroke.try_into()?),
            dto::ActionDto::Shape(shape) => Action::Shape(shape.try_into()?),
            dto::ActionDto::Text(text) => Action::Text(text.try_into()?),
        })
    }
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<Point> for dto::PointDto {
    fn from(point: Point) -> Self {
        Self {
            x: point.x,
            y: point.y,
        }
    }
}

impl From<StrokeTool> for dto::StrokeToolDto {
    fn from(tool: StrokeTool) -> Self {
        match tool {
            StrokeTool::Pen => dto::StrokeToolDto::Pen,
            StrokeTool::Eraser => dto::StrokeToolDto::Eraser,
        }
    }
}

impl From<Composite> for dto::CompositeDto {
    fn from(composite: Composite) -> Self {
        match composite {
            Composite::SourceOver => dto::CompositeDto::SourceOver,
            Composite::DestinationOut => dto::CompositeDto::DestinationOut,
        }
    }
}

impl From<&Stroke> for dto::StrokeDto {
    fn from(model: &Stroke) -> Self {
        Self {
            tool: model.tool.into(),
            color: model.color.as_str().to_string(),
            size: model.size.value(),
            points: model.points.iter().copied().map(Into::into).collect(),
        }
    }
}

impl From<ShapeGeometry> for dto::ShapeGeometryDto {
    fn from(model: ShapeGeometry) -> Self {
        match model {
            ShapeGeometry::Rect { x, y, w, h } => dto::ShapeGeometryDto::Rect { x, y, w, h },
            ShapeGeometry::Circle { cx, cy, r } => dto::ShapeGeometryDto::Circle { cx, cy, r },
            ShapeGeometry::Line { x1, y1, x2, y2 } => {
                dto::ShapeGeometryDto::Line { x1, y1, x2, y2 }
            }
        }
    }
}

impl From<&Shape> for dto::ShapeDto {
    fn from(model: &Shape) -> Self {
        Self {
            color: model.color.as_str().to_string(),
            size: model.size.value(),
            geometry: model.geometry.into(),
        }
    }
}

impl From<&TextLabel> for dto::TextDto {
    fn from(model: &TextLabel) -> Self {
        Self {
            x: model.position.x,
            y: model.position.y,
            text: model.text.as_str().to_string(),
            color: model.color.as_str().to_string(),
            size: model.size.value(),
        }
    }
}

impl From<&LiveSegment> for dto::SegmentDto {
    fn from(model: &LiveSegment) -> Self {
        Self {
            x1: model.from.x,
            y1: model.from.y,
            x2: model.to.x,
            y2: model.to.y,
            color: model.color.as_str().to_string(),
            size: model.size.value(),
            composite: model.composite.into(),
        }
    }
}

impl From<&Action> for dto::ActionDto {
    fn from(model: &Action) -> Self {
        match model {
            Action::Stroke(stroke) => dto::ActionDto::Stroke(stroke.into()),
            Action::Shape(shape) => dto::ActionDto::Shape(shape.into()),
            Action::Text(text) => dto::ActionDto::Text(text.into()),
        }
    }
}

fn snapshot_dto(actions: &[Action]) -> Vec<dto::ActionDto> {
    actions.iter().map(Into::into).collect()
}

impl From<&RoomEvent> for dto::ServerEvent {
    fn from(event: &RoomEvent) -> Self {
        match event {
            RoomEvent::Init(actions) => dto::ServerEvent::Init(snapshot_dto(actions)),
            RoomEvent::Draw(segment) => dto::ServerEvent::Draw(segment.into()),
            RoomEvent::Appended(Action::Stroke(stroke)) => dto::ServerEvent::Stroke(stroke.into()),
            RoomEvent::Appended(Action::Shape(shape)) => dto::ServerEvent::Shape(shape.into()),
            RoomEvent::Appended(Action::Text(text)) => dto::ServerEvent::Text(text.into()),
            RoomEvent::Clear => dto::ServerEvent::Clear,
            RoomEvent::Rebuild(actions) => dto::ServerEvent::Rebuild(snapshot_dto(actions)),
            RoomEvent::Cursor {
                connection_id,
                position,
            } => dto::ServerEvent::Cursor(dto::CursorPositionDto {
                id: connection_id.as_str().to_string(),
                x: position.x,
                y: position.y,
            }),
            RoomEvent::CursorLeft { connection_id } => {
                dto::ServerEvent::CursorLeft(dto::CursorLeftDto {
                    id: connection_id.as_str().to_string(),
                })
            }
        }
    }
}
