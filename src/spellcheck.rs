/// Nearest-candidate lookup for a misspelled build-argument name.
///
/// Returns the single closest candidate within a small Levenshtein-distance
/// budget, or `None` if nothing is close enough. Ties break on first
/// occurrence in `candidates`.
pub fn suggest<'a>(misspelled: &str, candidates: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let budget = threshold(misspelled.len());
    let mut best: Option<(&'a str, usize)> = None;
    for candidate in candidates {
        if candidate == misspelled {
            continue;
        }
        let distance = levenshtein(misspelled, candidate, budget);
        let Some(distance) = distance else { continue };
        match best {
            Some((_, best_distance)) if best_distance <= distance => {}
            _ => best = Some((candidate, distance)),
        }
    }
    best.map(|(candidate, _)| candidate)
}

/// `max(1, floor(len/4))`, the suggested edit-distance budget.
fn threshold(len: usize) -> usize {
    (len / 4).max(1)
}

/// Levenshtein edit distance with an early exit once the running minimum in
/// every row exceeds `budget` — at that point no cell in the final row can
/// come in under budget either, so the candidate is rejected without
/// finishing the table.
fn levenshtein(a: &str, b: &str, budget: usize) -> Option<usize> {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.len().abs_diff(b.len()) > budget {
        return None;
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        let mut row_min = curr[0];
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
            row_min = row_min.min(curr[j]);
        }
        if row_min > budget {
            return None;
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    let distance = prev[b.len()];
    (distance <= budget).then_some(distance)
}
