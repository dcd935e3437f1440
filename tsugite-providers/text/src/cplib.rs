//! Upper-triangle weight matrix format.

use crate::{NumberedLine, ParsedGraph, TextProviderError, check_vertex_count, parse_token};

/// Row-major walk over the pairs `(i, j)` with `i < j < n`.
struct UpperTriangle {
    n: usize,
    i: usize,
    j: usize,
}

impl UpperTriangle {
    fn new(n: usize) -> Self {
        Self { n, i: 0, j: 1 }
    }
}

impl Iterator for UpperTriangle {
    type Item = [usize; 2];

    fn next(&mut self) -> Option<Self::Item> {
        if self.j >= self.n {
            self.i += 1;
            self.j = self.i + 1;
        }
        if self.j >= self.n {
            return None;
        }
        let pair = [self.i, self.j];
        self.j += 1;
        Some(pair)
    }
}

pub(crate) fn parse(
    header_line: usize,
    header: &str,
    lines: impl Iterator<Item = NumberedLine>,
) -> Result<ParsedGraph, TextProviderError> {
    let vertex_count = check_vertex_count(header_line, parse_token(header_line, header)?)?;
    let expected = vertex_count.saturating_mul(vertex_count.saturating_sub(1)) / 2;

    let mut pairs = UpperTriangle::new(vertex_count);
    let mut found = 0;
    let mut edges = Vec::new();
    let mut weights = Vec::new();
    for line in lines {
        let (number, text) = line?;
        for token in text.split_whitespace() {
            let weight: f64 = parse_token(number, token)?;
            let Some(pair) = pairs.next() else {
                return Err(TextProviderError::TrailingWeights {
                    line: number,
                    expected,
                });
            };
            found += 1;
            if weight != 0.0 {
                edges.push(pair);
                weights.push(weight);
            }
        }
    }

    if found < expected {
        return Err(TextProviderError::MissingWeights { expected, found });
    }
    Ok(ParsedGraph {
        vertex_count,
        edges,
        weights,
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::UpperTriangle;

    #[rstest]
    #[case(0, &[])]
    #[case(1, &[])]
    #[case(2, &[[0, 1]])]
    #[case(4, &[[0, 1], [0, 2], [0, 3], [1, 2], [1, 3], [2, 3]])]
    fn walks_upper_triangle_row_major(#[case] n: usize, #[case] expected: &[[usize; 2]]) {
        let pairs: Vec<[usize; 2]> = UpperTriangle::new(n).collect();
        assert_eq!(pairs, expected);
    }
}
