use std::fmt::Display;
use std::sync::{Arc, Mutex, OnceLock};

use ahash::AHashMap;
use itertools::Itertools;
use log::trace;

use crate::config::is_multithread_enabled;
use crate::{GridDeg, isize2};

#[cfg(feature = "multithread")]
use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};

pub type Grid1<E> = Grid<isize,  E>;
pub type Grid2<E> = Grid<isize2, E>;
pub type Grid3<E> = Grid<crate::isize3, E>;

type Cell<E> = Arc<OnceLock<Arc<E>>>;

struct GridSource<I, E> { 
    func: Box<dyn Fn(I) -> E + Send + Sync>,
    cache: Mutex<AHashMap<I, Cell<E>>>
}

impl<I, E> GridSource<I, E>
where I: GridDeg { 
    fn cell(&self, i: I) -> Cell<E> { 
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.entry(i).or_default().clone()
    }

    fn get(&self, i: I) -> Arc<E> { 
        // the lock is released before `func` runs, so that `func` may 
        // query other indices of the same grid.
        let cell = self.cell(i);
        cell.get_or_init(|| { 
            trace!("grid: compute at {i}");
            Arc::new((self.func)(i))
        }).clone()
    }

    fn is_cached(&self, i: I) -> bool { 
        let cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.get(&i).is_some_and(|c| c.get().is_some())
    }
}

/// A lazy, memoized function from indices to values. 
/// 
/// Each value is computed at most once, on first access, and is 
/// shared by every grid derived through `shifted`. Indices outside 
/// `support` may also be queried.
pub struct Grid<I, E>
where I: GridDeg { 
    support: Vec<I>,
    source: Arc<GridSource<I, E>>,
    shift: I
}

impl<I, E> Grid<I, E>
where I: GridDeg, E: Send + Sync + 'static { 
    pub fn new<It, F>(support: It, f: F) -> Self
    where 
        It: IntoIterator<Item = I>, 
        F: Fn(I) -> E + Send + Sync + 'static
    { 
        let support = support.into_iter().collect_vec();
        let source = Arc::new(GridSource { 
            func: Box::new(f), 
            cache: Mutex::new(AHashMap::new())
        });
        Self { support, source, shift: I::zero() }
    }

    pub fn support(&self) -> impl Iterator<Item = I> + '_ { 
        self.support.iter().cloned()
    }

    pub fn is_supported(&self, i: I) -> bool { 
        self.support.contains(&i)
    }

    pub fn get(&self, i: I) -> Arc<E> { 
        self.source.get(i - self.shift)
    }

    pub fn is_cached(&self, i: I) -> bool { 
        self.source.is_cached(i - self.shift)
    }

    pub fn iter(&self) -> impl Iterator<Item = (I, Arc<E>)> + '_ { 
        self.support().map(|i| (i, self.get(i)))
    }

    /// `self.shifted(s).get(i) == self.get(i - s)`. 
    /// No value is computed, and the cache is shared.
    pub fn shifted(&self, s: I) -> Self { 
        let support = self.support().map(|i| i + s).collect();
        let source = self.source.clone();
        Self { support, source, shift: self.shift + s }
    }

    pub fn map<E2, F>(&self, f: F) -> Grid<I, E2>
    where 
        E2: Send + Sync + 'static, 
        F: Fn(I, &E) -> E2 + Send + Sync + 'static
    { 
        let this = self.clone();
        Grid::new(self.support(), move |i| f(i, &this.get(i)))
    }

    /// Evaluates every supported index. 
    pub fn compute_all(&self) { 
        if is_multithread_enabled() { 
            self.compute_all_par()
        } else { 
            for &i in self.support.iter() { 
                self.get(i);
            }
        }
    }

    #[cfg(feature = "multithread")]
    fn compute_all_par(&self) { 
        self.support.par_iter().for_each(|&i| { 
            self.get(i);
        });
    }

    #[cfg(not(feature = "multithread"))]
    fn compute_all_par(&self) { 
        for &i in self.support.iter() { 
            self.get(i);
        }
    }
}

impl<I, E> Clone for Grid<I, E>
where I: GridDeg {
    fn clone(&self) -> Self {
        Self { 
            support: self.support.clone(), 
            source: self.source.clone(), 
            shift: self.shift 
        }
    }
}

impl<E> Grid1<E>
where E: Display + Send + Sync + 'static { 
    pub fn display_seq(&self, label: &str) -> String { 
        use hana::util::format::table;
        table(label, [""].iter(), self.support(), |_, &i| { 
            self.get(i).to_string()
        })
    }

    pub fn print_seq(&self, label: &str) { 
        println!("{}", self.display_seq(label))
    }
}

impl<E> Grid2<E>
where E: Display + Send + Sync + 'static { 
    pub fn display_table(&self, label: &str) -> String { 
        use hana::util::format::table;

        let cols = self.support().map(|isize2(i, _)| i).unique().sorted();
        let rows = self.support().map(|isize2(_, j)| j).unique().sorted().rev();

        table(label, rows, cols, |&j, &i| { 
            let idx = isize2(i, j);
            if self.is_supported(idx) { 
                self.get(idx).to_string()
            } else { 
                String::from(".")
            }
        })
    }

    pub fn print_table(&self, label: &str) { 
        println!("{}", self.display_table(label))
    }
}
