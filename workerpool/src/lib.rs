//! # workerpool
//! src/lib.rs
//!
//! Pool de workers de concurrencia acotada: reparte jobs entre un número fijo
//! de threads y junta los resultados en un único stream, con cancelación
//! cooperativa y shutdown determinista.
//!
//! ## Ejemplo de uso
//!
//! ```
//! use workerpool::{transform, CancelToken, Job, Pool};
//!
//! let mut pool = Pool::new(3, 8).unwrap();
//! let results = pool.start(&CancelToken::new()).unwrap();
//!
//! let upper = transform(|b| Ok(b.to_ascii_uppercase()));
//! pool.submit(Job::new(1, "hola", upper)).unwrap();
//! pool.shutdown();
//!
//! let all: Vec<_> = results.collect();
//! assert_eq!(all[0].output, b"HOLA");
//! ```
//!
//! Con más jobs que el buffer, el stream debe drenarse desde otro thread
//! mientras se envían jobs.

pub mod cancel;
pub mod error;
pub mod job;
pub mod pool;

pub use cancel::CancelToken;
pub use crossbeam_channel::RecvTimeoutError;
pub use error::{BoxError, PoolError, TransformFailure};
pub use job::{transform, Job, JobResult, Transform};
pub use pool::{Pool, ResultStream};
