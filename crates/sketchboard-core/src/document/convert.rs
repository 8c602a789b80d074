//! Conversion between shapes and Loro map entries.

use crate::shapes::{Bounds, Line, Point, Rectangle, SerializableColor, Shape, ShapeKind};
use crate::ticket::CreationTicket;
use loro::{LoroList, LoroMap, LoroMapValue, LoroResult, LoroValue};

const KEY_TYPE: &str = "type";

// Color keys
const KEY_COLOR_R: &str = "color_r";
const KEY_COLOR_G: &str = "color_g";
const KEY_COLOR_B: &str = "color_b";
const KEY_COLOR_A: &str = "color_a";

// Rect keys
const KEY_X: &str = "x";
const KEY_Y: &str = "y";
const KEY_WIDTH: &str = "width";
const KEY_HEIGHT: &str = "height";

// Line keys
const KEY_POINTS: &str = "points";
const KEY_STROKE_WIDTH: &str = "stroke_width";

fn get_double(map: &LoroMapValue, key: &str) -> Option<f64> {
    as_double(map.get(key)?)
}

fn get_i64(map: &LoroMapValue, key: &str) -> Option<i64> {
    match map.get(key)? {
        LoroValue::I64(i) => Some(*i),
        LoroValue::Double(d) => Some(*d as i64),
        _ => None,
    }
}

fn get_string(map: &LoroMapValue, key: &str) -> Option<String> {
    match map.get(key)? {
        LoroValue::String(s) => Some(s.to_string()),
        _ => None,
    }
}

fn as_double(value: &LoroValue) -> Option<f64> {
    match value {
        LoroValue::Double(d) => Some(*d),
        LoroValue::I64(i) => Some(*i as f64),
        _ => None,
    }
}

/// Write a shape's fields into an attached, empty map.
pub fn shape_to_loro(shape: &Shape, map: &LoroMap) -> LoroResult<()> {
    map.insert(KEY_TYPE, shape.kind().as_str())?;
    color_to_loro(shape.color(), map)?;
    match shape {
        Shape::Rectangle(rect) => {
            map.insert(KEY_X, rect.bounds.x)?;
            map.insert(KEY_Y, rect.bounds.y)?;
            map.insert(KEY_WIDTH, rect.bounds.width)?;
            map.insert(KEY_HEIGHT, rect.bounds.height)?;
        }
        Shape::Line(line) => {
            map.insert(KEY_STROKE_WIDTH, line.stroke_width)?;
            // Points as a list of [x, y] pairs
            let points_list = map.insert_container(KEY_POINTS, LoroList::new())?;
            for point in &line.points {
                let pair = points_list.push_container(LoroList::new())?;
                pair.push(point.x)?;
                pair.push(point.y)?;
            }
        }
    }
    Ok(())
}

fn color_to_loro(color: SerializableColor, map: &LoroMap) -> LoroResult<()> {
    map.insert(KEY_COLOR_R, color.r as i64)?;
    map.insert(KEY_COLOR_G, color.g as i64)?;
    map.insert(KEY_COLOR_B, color.b as i64)?;
    map.insert(KEY_COLOR_A, color.a as i64)?;
    Ok(())
}

/// Rebuild a shape from the deep value of its map. `None` if the entry is malformed.
pub fn shape_from_loro(ticket: CreationTicket, map: &LoroMapValue) -> Option<Shape> {
    let kind = ShapeKind::parse(&get_string(map, KEY_TYPE)?)?;
    let color = color_from_loro(map);
    match kind {
        ShapeKind::Rect => {
            let bounds = Bounds::new(
                get_double(map, KEY_X)?,
                get_double(map, KEY_Y)?,
                get_double(map, KEY_WIDTH)?,
                get_double(map, KEY_HEIGHT)?,
            );
            Some(Shape::Rectangle(Rectangle::reconstruct(ticket, bounds, color)))
        }
        ShapeKind::Line => {
            let stroke_width = get_double(map, KEY_STROKE_WIDTH)?;
            let points = match map.get(KEY_POINTS) {
                Some(LoroValue::List(list)) => list.iter().filter_map(point_from_loro).collect(),
                _ => Vec::new(),
            };
            Some(Shape::Line(Line::reconstruct(ticket, points, color, stroke_width)))
        }
    }
}

fn point_from_loro(value: &LoroValue) -> Option<Point> {
    let LoroValue::List(coords) = value else {
        return None;
    };
    let x = as_double(coords.first()?)?;
    let y = as_double(coords.get(1)?)?;
    Some(Point::new(x, y))
}

fn color_from_loro(map: &LoroMapValue) -> SerializableColor {
    let channel =
        |key: &str, default: i64| get_i64(map, key).unwrap_or(default).clamp(0, 255) as u8;
    SerializableColor::new(
        channel(KEY_COLOR_R, 0),
        channel(KEY_COLOR_G, 0),
        channel(KEY_COLOR_B, 0),
        channel(KEY_COLOR_A, 255),
    )
}
