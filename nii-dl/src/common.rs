pub use indexmap::IndexSet;
pub use itertools::Itertools as _;
pub use log::{debug, info, warn};
pub use ndarray::{s, Array2, Array3, Array4, Array5, ArrayView3, Axis};
pub use rand::{prelude::*, rngs::StdRng};
pub use serde::{Deserialize, Serialize};
pub use std::{
    fmt,
    fmt::Debug,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
