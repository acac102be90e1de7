use std::collections::HashSet;

/// Deterministically derive up to `min(5, dim/10)` target dimensions for a
/// vocabulary index (spec.md §4.6 "Projection").
///
/// Dimensions are chosen by hashing `(term_index, nonce)` with blake3 and
/// reducing modulo `dim`, incrementing `nonce` on collision until either the
/// target count is reached or a bounded number of attempts is exhausted (a
/// dense enough `dim` will virtually never hit the bound).
pub fn target_dims(term_index: usize, dim: usize) -> Vec<usize> {
    let wanted = (5.min(dim / 10)).max(1);
    let mut dims = Vec::with_capacity(wanted);
    let mut seen = HashSet::with_capacity(wanted);
    let max_attempts = wanted * 8 + 8;
    for nonce in 0..max_attempts {
        if dims.len() >= wanted {
            break;
        }
        let mut input = [0u8; 16];
        input[..8].copy_from_slice(&(term_index as u64).to_le_bytes());
        input[8..].copy_from_slice(&(nonce as u64).to_le_bytes());
        let hash = blake3::hash(&input);
        let bytes = hash.as_bytes();
        let idx = (u64::from_le_bytes(bytes[0..8].try_into().unwrap()) as usize) % dim.max(1);
        if seen.insert(idx) {
            dims.push(idx);
        }
    }
    dims
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dim_count_matches_formula() {
        assert_eq!(target_dims(0, 300).len(), 5);
        assert_eq!(target_dims(0, 30).len(), 3);
        assert_eq!(target_dims(0, 5).len(), 1);
    }

    #[test]
    fn is_deterministic_for_same_index() {
        let a = target_dims(42, 300);
        let b = target_dims(42, 300);
        assert_eq!(a, b);
    }

    #[test]
    fn different_indices_usually_diverge() {
        let a = target_dims(1, 300);
        let b = target_dims(2, 300);
        assert_ne!(a, b);
    }

    #[test]
    fn all_dims_are_in_bounds() {
        for idx in &target_dims(7, 64) {
            assert!(*idx < 64);
        }
    }
}
