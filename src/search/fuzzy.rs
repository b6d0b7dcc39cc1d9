/// Best occurrence of `pattern` anywhere inside `text`, allowing edits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Approximate {
    pub errors: usize,
    pub start: usize,
}

#[derive(Clone, Copy)]
struct Cell {
    cost: usize,
    start: usize,
}

/// Edit distance between `pattern` and every substring of `text`; skipping
/// text before and after the match is free. Returns one candidate per end
/// position so the caller can weigh errors against position.
fn candidates(pattern: &[char], text: &[char]) -> Vec<Approximate> {
    let n = text.len();
    let mut prev: Vec<Cell> = (0..=n).map(|j| Cell { cost: 0, start: j }).collect();
    let mut cur: Vec<Cell> = vec![Cell { cost: 0, start: 0 }; n + 1];

    for (i, &pc) in pattern.iter().enumerate() {
        cur[0] = Cell { cost: i + 1, start: 0 };
        for j in 1..=n {
            let diagonal = Cell {
                cost: prev[j - 1].cost + usize::from(pc != text[j - 1]),
                start: prev[j - 1].start,
            };
            let skip_pattern = Cell { cost: prev[j].cost + 1, start: prev[j].start };
            let skip_text = Cell { cost: cur[j - 1].cost + 1, start: cur[j - 1].start };

            let mut best = diagonal;
            for cell in [skip_pattern, skip_text] {
                if cell.cost < best.cost {
                    best = cell;
                }
            }
            cur[j] = best;
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    prev.into_iter()
        .map(|cell| Approximate { errors: cell.cost, start: cell.start })
        .collect()
}

/// 0.0 is a perfect match at `location`, larger is worse. `None` for an
/// empty pattern or text.
pub fn score(pattern: &[char], text: &[char], location: usize, distance: usize) -> Option<f64> {
    if pattern.is_empty() || text.is_empty() {
        return None;
    }

    let len = pattern.len() as f64;
    candidates(pattern, text)
        .into_iter()
        .map(|m| m.errors as f64 / len + proximity(m.start, location, distance))
        .min_by(|a, b| a.total_cmp(b))
}

fn proximity(start: usize, location: usize, distance: usize) -> f64 {
    let offset = start.abs_diff(location);
    if distance == 0 {
        return if offset == 0 { 0.0 } else { 1.0 };
    }
    offset as f64 / distance as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn best(pattern: &str, text: &str) -> Approximate {
        candidates(&chars(pattern), &chars(text))
            .into_iter()
            .min_by_key(|m| (m.errors, m.start))
            .unwrap()
    }

    #[test]
    fn test_exact_substring() {
        assert_eq!(best("launch", "gpt-5 launch"), Approximate { errors: 0, start: 6 });
        assert_eq!(best("gpt", "gpt-5 launch"), Approximate { errors: 0, start: 0 });
    }

    #[test]
    fn test_typos() {
        assert_eq!(best("gpt5 lanch", "gpt-5 launch"), Approximate { errors: 2, start: 0 });
        assert_eq!(best("opnai", "openai").errors, 1);
        assert_eq!(best("robitcs", "robotics").errors, 2);
    }

    #[test]
    fn test_pattern_longer_than_text() {
        assert_eq!(best("launches", "launch").errors, 2);
    }

    #[test]
    fn test_score() {
        let s = score(&chars("gpt5 lanch"), &chars("gpt-5 launch"), 0, 100).unwrap();
        assert!((s - 0.2).abs() < 1e-9);

        let s = score(&chars("launch"), &chars("gpt-5 launch"), 0, 100).unwrap();
        assert!((s - 0.06).abs() < 1e-9);

        let s = score(&chars("launch"), &chars("gpt-5 launch"), 0, 0).unwrap();
        assert!(s > 0.0);

        assert!(score(&[], &chars("text"), 0, 100).is_none());
        assert!(score(&chars("text"), &[], 0, 100).is_none());
    }
}
