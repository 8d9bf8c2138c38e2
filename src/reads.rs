//! C1: the read corpus (spec §3, §4.1).
//!
//! Reads are stored over the compact alphabet `{A=1, C=2, G=3, T=4}`; `0`
//! is reserved as the sentinel used only in the concatenated index text,
//! never inside a `Read`'s own byte buffer.

use crate::config::Config;

/// Which orientation of a read a search or candidate refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Forward,
    Reverse,
}

/// Encode a single IUPAC byte to the compact alphabet. Returns `None` for
/// anything other than `ACGT` (case-insensitive).
pub fn encode_base(b: u8) -> Option<u8> {
    match b {
        b'A' | b'a' => Some(1),
        b'C' | b'c' => Some(2),
        b'G' | b'g' => Some(3),
        b'T' | b't' => Some(4),
        _ => None,
    }
}

/// Decode a compact-alphabet byte back to an uppercase IUPAC base.
pub fn decode_base(c: u8) -> u8 {
    match c {
        1 => b'A',
        2 => b'C',
        3 => b'G',
        4 => b'T',
        0 => b'$',
        _ => b'?',
    }
}

/// Complement a single compact-alphabet base (`A<->T`, `C<->G`), leaving
/// the sentinel fixed.
pub fn complement(c: u8) -> u8 {
    match c {
        1 => 4,
        2 => 3,
        3 => 2,
        4 => 1,
        other => other,
    }
}

fn reverse_complement(bases: &[u8]) -> Vec<u8> {
    bases.iter().rev().map(|&b| complement(b)).collect()
}

/// An immutable read: compact-alphabet bytes, its reverse complement, a
/// dense internal id, and the original FASTA position.
#[derive(Debug, Clone)]
pub struct Read {
    bases: Vec<u8>,
    rev_comp: Vec<u8>,
    internal_id: usize,
    original_id: usize,
}

impl Read {
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    pub fn bases(&self) -> &[u8] {
        &self.bases
    }

    pub fn rev_comp(&self) -> &[u8] {
        &self.rev_comp
    }

    /// The byte sequence for the given strand.
    pub fn strand(&self, strand: Strand) -> &[u8] {
        match strand {
            Strand::Forward => &self.bases,
            Strand::Reverse => &self.rev_comp,
        }
    }

    pub fn internal_id(&self) -> usize {
        self.internal_id
    }

    pub fn original_id(&self) -> usize {
        self.original_id
    }
}

/// Ordered collection of reads; owns all read bytes, lifetime spans the
/// whole pipeline. No mutation after construction (C1, spec §4.1).
#[derive(Debug, Default)]
pub struct ReadCorpus {
    reads: Vec<Read>,
}

impl ReadCorpus {
    pub fn new() -> Self {
        ReadCorpus { reads: Vec::new() }
    }

    /// Ingest one raw IUPAC-byte read. Returns the assigned internal id, or
    /// `None` if the read was dropped (too short after any `N`-handling).
    ///
    /// Non-ACGT bytes: per `config.fallback_non_acgt`, either remapped to
    /// `A` or stripped from the read entirely (this crate's documented
    /// default, matching the teacher's `n_alphabet` ingest toggle — see
    /// SPEC_FULL.md §C.3).
    pub fn add(&mut self, raw: &[u8], original_id: usize, config: &Config) -> Option<usize> {
        let mut bases = Vec::with_capacity(raw.len());
        for &b in raw {
            match encode_base(b) {
                Some(c) => bases.push(c),
                None if config.fallback_non_acgt => bases.push(1),
                None => {}
            }
        }
        if bases.len() < config.min_read_size {
            return None;
        }
        let internal_id = self.reads.len();
        let rev_comp = reverse_complement(&bases);
        self.reads.push(Read {
            bases,
            rev_comp,
            internal_id,
            original_id,
        });
        Some(internal_id)
    }

    pub fn get(&self, internal_id: usize) -> &Read {
        &self.reads[internal_id]
    }

    pub fn size(&self) -> usize {
        self.reads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reads.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Read> {
        self.reads.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_complement_is_involution() {
        let bases: Vec<u8> = b"ACGTACGTAC".iter().map(|&b| encode_base(b).unwrap()).collect();
        let rc = reverse_complement(&bases);
        let rc_rc = reverse_complement(&rc);
        assert_eq!(bases, rc_rc);
    }

    #[test]
    fn add_assigns_dense_ids() {
        let config = Config::default();
        let mut corpus = ReadCorpus::new();
        let id0 = corpus.add(b"ACGTACGTAC", 7, &config).unwrap();
        let id1 = corpus.add(b"GTACGTACGT", 3, &config).unwrap();
        assert_eq!(id0, 0);
        assert_eq!(id1, 1);
        assert_eq!(corpus.get(id0).original_id(), 7);
        assert_eq!(corpus.get(id1).original_id(), 3);
    }

    #[test]
    fn short_reads_are_dropped() {
        let mut config = Config::default();
        config.min_read_size = 5;
        let mut corpus = ReadCorpus::new();
        assert!(corpus.add(b"ACG", 0, &config).is_none());
        assert_eq!(corpus.size(), 0);
    }

    #[test]
    fn strips_n_by_default() {
        let config = Config::default();
        let mut corpus = ReadCorpus::new();
        let id = corpus.add(b"ACGNTACGT", 0, &config).unwrap();
        assert_eq!(corpus.get(id).len(), 8);
    }

    #[test]
    fn fallback_maps_n_to_a() {
        let mut config = Config::default();
        config.fallback_non_acgt = true;
        let mut corpus = ReadCorpus::new();
        let id = corpus.add(b"ACGNT", 0, &config).unwrap();
        assert_eq!(corpus.get(id).bases(), &[1, 2, 3, 1, 4]);
    }
}
