//! Case storage access.

use crate::{common::*, error::*, volume::Case};
use nifti::{IntoNdArray, NiftiObject, ReaderOptions};

const IMAGE_FILE_STEM: &str = "imaging";
const MASK_FILE_STEM: &str = "segmentation";

/// Resolves a case identifier to its paired image/mask volumes.
///
/// The on-disk format lives entirely behind this seam; the generator only
/// sees dense arrays.
pub trait CaseSource
where
    Self: Debug + Send + Sync,
{
    fn load(&self, case_id: &str) -> Result<Case>;
}

/// Case storage laid out as one directory per case containing
/// `imaging.nii` and `segmentation.nii` (optionally gzipped).
#[derive(Debug, Clone)]
pub struct NiftiCaseSource {
    root: PathBuf,
}

impl NiftiCaseSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Enumerate the case directories under the storage root, in sorted
    /// order. A directory qualifies when it contains an imaging file.
    pub fn discover_cases(&self) -> Result<Vec<String>> {
        let pattern = self
            .root
            .join("*")
            .join(format!("{IMAGE_FILE_STEM}.nii*"))
            .to_string_lossy()
            .into_owned();
        let paths =
            glob::glob(&pattern).map_err(|err| VolumeError::Listing(err.to_string()))?;

        let ids: Vec<String> = paths
            .filter_map(|entry| entry.ok())
            .filter_map(|path| {
                let dir = path.parent()?;
                Some(dir.file_name()?.to_string_lossy().into_owned())
            })
            .sorted()
            .dedup()
            .collect();
        Ok(ids)
    }

    fn resolve(&self, case_id: &str, stem: &str) -> Result<PathBuf> {
        let dir = self.root.join(case_id);
        for name in [format!("{stem}.nii"), format!("{stem}.nii.gz")] {
            let path = dir.join(name);
            if path.is_file() {
                return Ok(path);
            }
        }
        Err(VolumeError::NotFound {
            path: dir.join(format!("{stem}.nii")),
        })
    }

    fn read_volume(path: &Path) -> Result<Array3<f32>> {
        let object = ReaderOptions::new()
            .read_file(path)
            .map_err(|source| VolumeError::Load {
                path: path.to_owned(),
                source,
            })?;

        let data = object
            .into_volume()
            .into_ndarray::<f32>()
            .map_err(|source| VolumeError::Load {
                path: path.to_owned(),
                source,
            })?;

        // NIfTI stores (X, Y, Z); flip to (Z, Y, X) so the slicing axis
        // comes first. A trailing singleton channel axis is squeezed.
        let data = match data.ndim() {
            3 => data,
            4 if data.len_of(Axis(3)) == 1 => data.remove_axis(Axis(3)),
            _ => {
                return Err(VolumeError::InvalidDimensions(format!(
                    "{}: expected a 3D volume, found shape {:?}",
                    path.display(),
                    data.shape()
                )))
            }
        };
        let data = data
            .permuted_axes([2, 1, 0].as_slice())
            .as_standard_layout()
            .to_owned()
            .into_dimensionality::<Ix3>()
            .map_err(|err| VolumeError::InvalidDimensions(err.to_string()))?;
        Ok(data)
    }
}

impl CaseSource for NiftiCaseSource {
    fn load(&self, case_id: &str) -> Result<Case> {
        let image_path = self.resolve(case_id, IMAGE_FILE_STEM)?;
        let mask_path = self.resolve(case_id, MASK_FILE_STEM)?;

        // Negative intensities are scanner artifacts and air; clamp to zero.
        let mut image = Self::read_volume(&image_path)?;
        image.mapv_inplace(|v| v.max(0.0));

        let mask = Self::read_volume(&mask_path)?.mapv(|v| v as u8);

        debug!(
            "loaded case {} with shape {:?}",
            case_id,
            image.shape()
        );
        Case::new(image, mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_case_reports_not_found() {
        let source = NiftiCaseSource::new("/nonexistent-root");
        match source.load("case_00000") {
            Err(VolumeError::NotFound { path }) => {
                assert!(path.to_string_lossy().contains("case_00000"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn discover_cases_on_empty_root_is_empty() {
        let source = NiftiCaseSource::new("/nonexistent-root");
        assert!(source.discover_cases().unwrap().is_empty());
    }
}
