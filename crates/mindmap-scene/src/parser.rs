//! Parsers for SVG attribute micro-syntaxes.
//!
//! Scene shapes carry their geometry as strings: `transform` lists, path
//! `d` data, `points` lists and plain lengths. This module turns them into
//! [`Point`]s and numbers.
//!
//! Only the vertices a shape passes *through* are reported for paths: for a
//! cubic curve the two control points are skipped and the final on-curve
//! point is kept.

use winnow::{
    Parser as _,
    ascii::{float, multispace0},
    combinator::{opt, preceded, repeat, terminated},
    error::{ContextError, ErrMode},
    token::{literal, one_of, take_until, take_while},
};

use mindmap_core::geometry::Point;

use crate::error::SceneError;

type Input<'src> = &'src str;
type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

/// Path commands recognised by the tokenizer.
const PATH_COMMANDS: &str = "MmLlHhVvCcSsQqTtAaZz";

/// A path command letter with its raw numeric operands.
#[derive(Debug, Clone, PartialEq)]
struct Segment {
    command: char,
    operands: Vec<f32>,
}

/// Parse zero or more number separators (whitespace and commas)
fn separator(input: &mut Input<'_>) -> IResult<()> {
    take_while(0.., |c: char| c.is_whitespace() || c == ',')
        .void()
        .parse_next(input)
}

/// Parse a number preceded by optional separators
fn number(input: &mut Input<'_>) -> IResult<f32> {
    preceded(separator, float).parse_next(input)
}

/// Parse a path command letter
fn command(input: &mut Input<'_>) -> IResult<char> {
    preceded(separator, one_of(|c: char| PATH_COMMANDS.contains(c))).parse_next(input)
}

/// Parse a command followed by its operands
fn segment(input: &mut Input<'_>) -> IResult<Segment> {
    (command, repeat(0.., number))
        .map(|(command, operands)| Segment { command, operands })
        .parse_next(input)
}

/// Parse `translate(tx [ty])`
fn translate(input: &mut Input<'_>) -> IResult<Point> {
    (
        literal("translate"),
        multispace0,
        '(',
        number,
        opt(number),
        multispace0,
        ')',
    )
        .map(|(_, _, _, x, y, _, _)| Point::new(x, y.unwrap_or(0.0)))
        .parse_next(input)
}

/// Runs `parser` over the whole of `source`, returning the byte offset of
/// the first unconsumed character on failure.
fn parse_complete<'src, O>(
    source: &'src str,
    mut parser: impl FnMut(&mut Input<'src>) -> IResult<O>,
) -> Result<O, usize> {
    let mut input = source;
    let output = parser(&mut input).map_err(|_| source.len() - input.len())?;
    if separator(&mut input).is_err() || !input.is_empty() {
        return Err(source.len() - input.len());
    }
    Ok(output)
}

/// Extracts the offset of the first `translate(...)` in a `transform` list.
///
/// Returns `None` when the list has no translation or it is malformed.
///
/// # Examples
///
/// ```
/// # use mindmap_scene::parser::parse_translate;
/// # use mindmap_core::geometry::Point;
/// assert_eq!(parse_translate("translate(120, 45.5)"), Some(Point::new(120.0, 45.5)));
/// assert_eq!(parse_translate("scale(2) translate(3 4)"), Some(Point::new(3.0, 4.0)));
/// assert_eq!(parse_translate("rotate(45)"), None);
/// ```
pub fn parse_translate(transform: &str) -> Option<Point> {
    let mut input = transform;
    preceded(take_until(0.., "translate"), translate)
        .parse_next(&mut input)
        .ok()
}

/// Parses a numeric attribute such as `x="12"` or `width="36px"`.
pub fn parse_length(value: &str) -> Option<f32> {
    parse_complete(value, |input: &mut Input<'_>| {
        terminated(number, opt(literal("px"))).parse_next(input)
    })
    .ok()
}

/// Parses path `d` data into the sequence of on-path vertices.
///
/// Move, line, horizontal, vertical and cubic commands (absolute and
/// relative) each contribute their end point. Coordinate pairs repeated
/// after a command continue it; after a move they are line-tos. Other
/// commands advance the current point without contributing a vertex, and
/// incomplete trailing operand groups are ignored.
///
/// # Errors
///
/// Returns [`SceneError::InvalidPathData`] when the data contains anything
/// other than commands, numbers, whitespace and commas.
///
/// # Examples
///
/// ```
/// # use mindmap_scene::parser::parse_path_data;
/// # use mindmap_core::geometry::Point;
/// let points = parse_path_data("M10,20 C40,20 40,80 70,80").unwrap();
/// assert_eq!(points, vec![Point::new(10.0, 20.0), Point::new(70.0, 80.0)]);
/// ```
pub fn parse_path_data(data: &str) -> Result<Vec<Point>, SceneError> {
    let segments: Vec<Segment> = parse_complete(data, |input: &mut Input<'_>| {
        repeat(0.., segment).parse_next(input)
    })
    .map_err(|offset| SceneError::InvalidPathData {
        data: data.to_string(),
        offset,
    })?;

    Ok(trace_vertices(&segments))
}

/// Parses a `points` list (`x1,y1 x2,y2 ...`) into points.
///
/// A trailing unpaired coordinate is ignored.
///
/// # Errors
///
/// Returns [`SceneError::InvalidPoints`] when the list contains anything
/// other than numbers and separators.
pub fn parse_points(list: &str) -> Result<Vec<Point>, SceneError> {
    let coords: Vec<f32> = parse_complete(list, |input: &mut Input<'_>| {
        repeat(0.., number).parse_next(input)
    })
    .map_err(|offset| SceneError::InvalidPoints {
        list: list.to_string(),
        offset,
    })?;

    Ok(coords
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect())
}

/// Resolves an `(x, y)` operand pair against the current point.
fn resolve(current: Point, pair: &[f32], relative: bool) -> Point {
    let target = Point::new(pair[0], pair[1]);
    if relative {
        current.add_point(target)
    } else {
        target
    }
}

/// Walks parsed segments, tracking the current point.
fn trace_vertices(segments: &[Segment]) -> Vec<Point> {
    let mut vertices = Vec::new();
    let mut current = Point::default();
    let mut subpath_start = current;

    for Segment { command, operands } in segments {
        let relative = command.is_ascii_lowercase();

        match command.to_ascii_uppercase() {
            'M' => {
                for (i, pair) in operands.chunks_exact(2).enumerate() {
                    current = resolve(current, pair, relative);
                    if i == 0 {
                        subpath_start = current;
                    }
                    vertices.push(current);
                }
            }
            'L' => {
                for pair in operands.chunks_exact(2) {
                    current = resolve(current, pair, relative);
                    vertices.push(current);
                }
            }
            'H' => {
                for &x in operands {
                    let x = if relative { current.x() + x } else { x };
                    current = Point::new(x, current.y());
                    vertices.push(current);
                }
            }
            'V' => {
                for &y in operands {
                    let y = if relative { current.y() + y } else { y };
                    current = Point::new(current.x(), y);
                    vertices.push(current);
                }
            }
            'C' => {
                for group in operands.chunks_exact(6) {
                    current = resolve(current, &group[4..6], relative);
                    vertices.push(current);
                }
            }
            'S' | 'Q' => {
                for group in operands.chunks_exact(4) {
                    current = resolve(current, &group[2..4], relative);
                }
            }
            'T' => {
                for pair in operands.chunks_exact(2) {
                    current = resolve(current, pair, relative);
                }
            }
            'A' => {
                for group in operands.chunks_exact(7) {
                    current = resolve(current, &group[5..7], relative);
                }
            }
            'Z' => current = subpath_start,
            _ => unreachable!("tokenizer only accepts path commands"),
        }
    }

    vertices
}
