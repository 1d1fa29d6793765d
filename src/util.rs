//! Provides several utilities and helper functions.

pub mod urls;

/// Splits a collection into at most `batches` evenly sized chunks. The last
/// chunk may be smaller than the others.
pub fn chunk<T: Clone>(items: Vec<T>, batches: usize) -> Vec<Vec<T>> {
    if items.is_empty() || batches == 0 {
        return Vec::new();
    }

    let size = (items.len() + batches - 1) / batches;
    items.chunks(size).map(|chunk| chunk.to_vec()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_chunks() {
        let chunks = chunk((0..10).collect(), 5);
        assert_eq!(chunks.len(), 5);
        assert!(chunks.iter().all(|c| c.len() == 2));
        assert_eq!(chunks[0], vec![0, 1]);
        assert_eq!(chunks[4], vec![8, 9]);
    }

    #[test]
    fn fewer_items_than_batches() {
        let chunks = chunk(vec![1, 2, 3], 5);
        assert_eq!(chunks, vec![vec![1], vec![2], vec![3]]);
    }

    #[test]
    fn uneven_tail() {
        let chunks = chunk((0..11).collect::<Vec<i32>>(), 5);
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks.last().map(Vec::len), Some(2));
        let total: usize = chunks.iter().map(Vec::len).sum();
        assert_eq!(total, 11);
    }

    #[test]
    fn empty_input() {
        assert!(chunk(Vec::<i32>::new(), 5).is_empty());
    }
}
