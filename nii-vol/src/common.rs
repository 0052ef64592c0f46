pub use itertools::Itertools as _;
pub use log::{debug, warn};
pub use ndarray::{s, Array2, Array3, Array4, ArrayD, ArrayView2, Axis, Ix3, Ix4};
pub use std::{
    fmt,
    fmt::Debug,
    path::{Path, PathBuf},
};
