use std::collections::HashMap;

pub type TermId = u32;

/// Frozen term → axis mapping. Term ids follow lexicographic term order.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    terms: Vec<String>,
    dictionary: HashMap<String, TermId>,
}

impl Vocabulary {
    /// Build from distinct terms in any order.
    pub fn from_terms<I: IntoIterator<Item = String>>(terms: I) -> Self {
        let mut terms: Vec<String> = terms.into_iter().collect();
        terms.sort_unstable();
        terms.dedup();
        let dictionary = terms
            .iter()
            .enumerate()
            .map(|(id, t)| (t.clone(), id as TermId))
            .collect();
        Self { terms, dictionary }
    }

    pub fn len(&self) -> usize { self.terms.len() }

    pub fn is_empty(&self) -> bool { self.terms.is_empty() }

    pub fn id(&self, term: &str) -> Option<TermId> { self.dictionary.get(term).copied() }

    pub fn term(&self, id: TermId) -> Option<&str> { self.terms.get(id as usize).map(String::as_str) }

    pub fn terms(&self) -> &[String] { &self.terms }
}

/// Sparse weighted-term vector; `indices` strictly ascending, one weight per index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    indices: Vec<TermId>,
    values: Vec<f32>,
}

impl SparseVector {
    /// Build from (term, weight) pairs; sorts by term and drops zero weights.
    pub fn from_pairs(mut pairs: Vec<(TermId, f32)>) -> Self {
        pairs.sort_unstable_by_key(|(t, _)| *t);
        let mut indices = Vec::with_capacity(pairs.len());
        let mut values = Vec::with_capacity(pairs.len());
        for (t, w) in pairs {
            if w == 0.0 { continue; }
            if indices.last() == Some(&t) {
                if let Some(last) = values.last_mut() { *last += w; }
                continue;
            }
            indices.push(t);
            values.push(w);
        }
        Self { indices, values }
    }

    pub fn indices(&self) -> &[TermId] { &self.indices }

    pub fn values(&self) -> &[f32] { &self.values }

    pub fn nnz(&self) -> usize { self.indices.len() }

    pub fn is_zero(&self) -> bool { self.values.iter().all(|w| *w == 0.0) }

    pub fn get(&self, term: TermId) -> f32 {
        match self.indices.binary_search(&term) {
            Ok(pos) => self.values[pos],
            Err(_) => 0.0,
        }
    }

    pub fn norm(&self) -> f32 { self.values.iter().map(|w| w * w).sum::<f32>().sqrt() }

    /// Merge-join dot product over the shared non-zero axes.
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j) = (0, 0);
        let mut acc = 0.0f32;
        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    acc += self.values[i] * other.values[j];
                    i += 1;
                    j += 1;
                }
            }
        }
        acc
    }

    pub(crate) fn scale(&mut self, factor: f32) {
        for w in self.values.iter_mut() { *w *= factor; }
    }
}

/// Row-ordered collection of document vectors sharing one vocabulary.
#[derive(Debug, Clone, Default)]
pub struct DocumentMatrix {
    rows: Vec<SparseVector>,
    num_features: usize,
}

impl DocumentMatrix {
    pub fn new(rows: Vec<SparseVector>, num_features: usize) -> Self {
        Self { rows, num_features }
    }

    pub fn rows(&self) -> &[SparseVector] { &self.rows }

    pub fn row(&self, i: usize) -> Option<&SparseVector> { self.rows.get(i) }

    pub fn len(&self) -> usize { self.rows.len() }

    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    /// Column count, i.e. vocabulary size of the fit that produced the rows.
    pub fn num_features(&self) -> usize { self.num_features }

    /// Split into `[..at]` and `[at..]`, both keeping the column count.
    pub fn split_at(mut self, at: usize) -> (DocumentMatrix, DocumentMatrix) {
        let at = at.min(self.rows.len());
        let tail = self.rows.split_off(at);
        (
            DocumentMatrix::new(self.rows, self.num_features),
            DocumentMatrix::new(tail, self.num_features),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_ids_follow_term_order() {
        let v = Vocabulary::from_terms(vec!["python".into(), "backend".into(), "engin".into(), "backend".into()]);
        assert_eq!(v.len(), 3);
        assert_eq!(v.id("backend"), Some(0));
        assert_eq!(v.id("engin"), Some(1));
        assert_eq!(v.id("python"), Some(2));
        assert_eq!(v.term(1), Some("engin"));
        assert_eq!(v.id("java"), None);
    }

    #[test]
    fn sparse_vector_sorted_and_merged() {
        let v = SparseVector::from_pairs(vec![(5, 1.0), (1, 2.0), (5, 0.5), (3, 0.0)]);
        assert_eq!(v.indices(), &[1, 5]);
        assert_eq!(v.values(), &[2.0, 1.5]);
        assert_eq!(v.get(3), 0.0);
    }

    #[test]
    fn dot_only_counts_shared_axes() {
        let a = SparseVector::from_pairs(vec![(0, 1.0), (2, 2.0), (4, 3.0)]);
        let b = SparseVector::from_pairs(vec![(2, 4.0), (3, 1.0), (4, 1.0)]);
        assert_eq!(a.dot(&b), 11.0);
    }

    #[test]
    fn split_preserves_rows_and_columns() {
        let rows = (0..5).map(|i| SparseVector::from_pairs(vec![(i, 1.0)])).collect();
        let (head, tail) = DocumentMatrix::new(rows, 7).split_at(2);
        assert_eq!(head.len(), 2);
        assert_eq!(tail.len(), 3);
        assert_eq!(head.num_features(), 7);
        assert_eq!(tail.num_features(), 7);
        assert_eq!(tail.row(0).unwrap().indices(), &[2]);
    }
}
