//! `i j w` edge-list format.

use crate::{NumberedLine, ParsedGraph, TextProviderError, check_vertex_count, parse_token};

pub(crate) fn parse(
    lines: impl Iterator<Item = NumberedLine>,
) -> Result<ParsedGraph, TextProviderError> {
    let mut edges = Vec::new();
    let mut weights = Vec::new();
    let mut vertex_count = 0;
    for line in lines {
        let (number, text) = line?;
        let fields: Vec<&str> = text.split_whitespace().collect();
        match fields.as_slice() {
            [] => continue,
            [a, b, w] => {
                let a: usize = parse_token(number, a)?;
                let b: usize = parse_token(number, b)?;
                let weight: f64 = parse_token(number, w)?;
                let needed = check_vertex_count(number, a.max(b).saturating_add(1))?;
                vertex_count = vertex_count.max(needed);
                edges.push([a, b]);
                weights.push(weight);
            }
            other => {
                return Err(TextProviderError::MalformedEdge {
                    line: number,
                    fields: other.len(),
                });
            }
        }
    }
    Ok(ParsedGraph {
        vertex_count,
        edges,
        weights,
    })
}
