//! Times the same lookups against a `ChainedHashMap` and a `LinearStore` so
//! the two can be put side by side. This only measures; printing the report
//! is left to whoever asked for it.

use std::{
    borrow::Borrow,
    fmt,
    hash::{BuildHasher, Hash},
    hint::black_box,
    time::{Duration, Instant},
};

use log::debug;

use crate::chained_hash_map::ChainedHashMap;
use crate::linear_store::LinearStore;
use crate::record::Record;
use crate::store::Store;

/// How one lookup went.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryTiming {
    /// Position of the identifier in the list that was searched for.
    pub query: usize,
    pub elapsed: Duration,
    pub found: bool,
}

/// Every lookup made against one store, in the order they were made.
#[derive(Debug, Clone, Default)]
pub struct Timings {
    queries: Vec<QueryTiming>,
}

impl Timings {
    pub fn queries(&self) -> &[QueryTiming] {
        &self.queries
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    /// Arithmetic mean over every lookup. Nothing timed means zero.
    pub fn mean(&self) -> Duration {
        if self.queries.is_empty() {
            return Duration::from_secs(0);
        }

        let total: Duration = self.queries.iter().map(|q| q.elapsed).sum();
        total / self.queries.len() as u32
    }
}

/// Looks up each identifier in turn, timing every search on its own.
pub fn time_searches<R, T, Q>(store: &T, ids: &[&Q]) -> Timings
where
    R: Record,
    R::Id: Borrow<Q>,
    T: Store<R>,
    Q: Hash + Eq + ?Sized,
{
    let queries = ids
        .iter()
        .enumerate()
        .map(|(query, id)| {
            let start = Instant::now();
            let found = black_box(store.search(*id)).is_some();
            let elapsed = start.elapsed();

            QueryTiming {
                query,
                elapsed,
                found,
            }
        })
        .collect();

    Timings { queries }
}

/// One of the two stores being compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contender {
    ChainedHashMap,
    LinearStore,
}

impl fmt::Display for Contender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Contender::ChainedHashMap => f.write_str("Hash Table"),
            Contender::LinearStore => f.write_str("Array"),
        }
    }
}

/// The outcome of running the same lookups against both stores.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub hashed: Timings,
    pub linear: Timings,
}

impl Comparison {
    /// The hash map wins only with a strictly lower mean; ties go to the list.
    pub fn faster(&self) -> Contender {
        if self.hashed.mean() < self.linear.mean() {
            Contender::ChainedHashMap
        } else {
            Contender::LinearStore
        }
    }

    /// How many times slower the loser's mean is than the winner's. Comes out
    /// as 1.0 when both are equal, and infinite if the winner took no
    /// measurable time at all.
    pub fn speedup(&self) -> f64 {
        let hashed = self.hashed.mean().as_secs_f64();
        let linear = self.linear.mean().as_secs_f64();
        let (fast, slow) = match self.faster() {
            Contender::ChainedHashMap => (hashed, linear),
            Contender::LinearStore => (linear, hashed),
        };

        if fast == slow {
            1.0
        } else if fast == 0.0 {
            f64::INFINITY
        } else {
            slow / fast
        }
    }

    /// Whether both stores found exactly the same identifiers. They should;
    /// only the time taken may differ.
    pub fn agrees(&self) -> bool {
        self.hashed.len() == self.linear.len()
            && self
                .hashed
                .queries()
                .iter()
                .zip(self.linear.queries())
                .all(|(h, l)| h.found == l.found)
    }
}

/// Runs the same lookups against a map and a list holding the same records.
pub fn compare<R, S, Q>(
    map: &ChainedHashMap<R, S>,
    linear: &LinearStore<R>,
    ids: &[&Q],
) -> Comparison
where
    R: Record,
    R::Id: Borrow<Q>,
    S: BuildHasher,
    Q: Hash + Eq + ?Sized,
{
    let comparison = Comparison {
        hashed: time_searches::<R, _, Q>(map, ids),
        linear: time_searches::<R, _, Q>(linear, ids),
    };

    debug!(
        "compared {} lookups: hash map mean {:?}, linear mean {:?}",
        ids.len(),
        comparison.hashed.mean(),
        comparison.linear.mean()
    );

    comparison
}

fn micros(d: Duration) -> f64 {
    d.as_secs_f64() * 1_000_000.0
}

fn write_timings(f: &mut fmt::Formatter<'_>, title: &str, timings: &Timings) -> fmt::Result {
    writeln!(f, "--- {} SEARCH ---", title)?;
    for q in timings.queries() {
        writeln!(
            f,
            "Query #{}: {:.4} microseconds{}",
            q.query + 1,
            micros(q.elapsed),
            if q.found { "" } else { " (not found)" }
        )?;
    }
    writeln!(
        f,
        "Average {} Search Time: {:.4} microseconds",
        title,
        micros(timings.mean())
    )
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_timings(f, "HASH TABLE", &self.hashed)?;
        writeln!(f)?;
        write_timings(f, "ARRAY", &self.linear)?;
        writeln!(f)?;
        writeln!(
            f,
            "Hash Table Average: {:.4} microseconds",
            micros(self.hashed.mean())
        )?;
        writeln!(
            f,
            "Array Average: {:.4} microseconds",
            micros(self.linear.mean())
        )?;
        write!(f, "{} is {:.2}x FASTER", self.faster(), self.speedup())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{compare, time_searches, Comparison, Contender, QueryTiming, Timings};
    use crate::{ChainedHashMap, LinearStore};

    fn timings(micros: &[u64]) -> Timings {
        Timings {
            queries: micros
                .iter()
                .enumerate()
                .map(|(query, m)| QueryTiming {
                    query,
                    elapsed: Duration::from_micros(*m),
                    found: true,
                })
                .collect(),
        }
    }

    fn products() -> Vec<(String, u32)> {
        (1..=8).map(|i| (format!("P{:03}", i), i)).collect()
    }

    #[test]
    fn test_mean() {
        assert_eq!(Duration::from_micros(4), timings(&[2, 4, 6]).mean());
        assert_eq!(Duration::from_secs(0), Timings::default().mean());
    }

    #[test]
    fn test_faster_and_speedup() {
        let comparison = Comparison {
            hashed: timings(&[1, 1, 1]),
            linear: timings(&[3, 3, 3]),
        };
        assert_eq!(Contender::ChainedHashMap, comparison.faster());
        assert!((comparison.speedup() - 3.0).abs() < 1e-9);

        let comparison = Comparison {
            hashed: timings(&[8]),
            linear: timings(&[2]),
        };
        assert_eq!(Contender::LinearStore, comparison.faster());
        assert!((comparison.speedup() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_tie_goes_to_linear() {
        let comparison = Comparison {
            hashed: timings(&[5]),
            linear: timings(&[5]),
        };
        assert_eq!(Contender::LinearStore, comparison.faster());
        assert_eq!(1.0, comparison.speedup());
    }

    #[test]
    fn test_compare_finds_the_same_records() {
        let mut map = ChainedHashMap::with_capacity(10).unwrap();
        let mut linear = LinearStore::new();
        map.extend(products());
        linear.extend(products());

        let comparison = compare(&map, &linear, &["P001", "P004", "P008"]);
        assert_eq!(3, comparison.hashed.len());
        assert_eq!(3, comparison.linear.len());
        assert!(comparison.hashed.queries().iter().all(|q| q.found));
        assert!(comparison.agrees());

        let report = comparison.to_string();
        assert!(report.contains("--- HASH TABLE SEARCH ---"));
        assert!(report.contains("Array Average"));
    }

    #[test]
    fn test_misses_are_timed_too() {
        let mut linear = LinearStore::new();
        linear.extend(products());

        let timed = time_searches(&linear, &["P002", "P100"]);
        let found: Vec<bool> = timed.queries().iter().map(|q| q.found).collect();
        assert_eq!(vec![true, false], found);
        assert_eq!(1, timed.queries()[1].query);
    }
}
