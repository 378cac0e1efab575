use candle_core::Device;
use tracing::debug;

#[cfg(any(feature = "metal", feature = "cuda"))]
use tracing::{info, warn};

/// Picks the inference device: Metal, then CUDA when compiled in, else CPU.
pub fn select_device() -> Device {
    #[cfg(feature = "metal")]
    {
        match Device::new_metal(0) {
            Ok(device) => {
                info!("Classifiers using Metal GPU");
                return device;
            }
            Err(e) => warn!(error = %e, "Metal device unavailable"),
        }
    }

    #[cfg(feature = "cuda")]
    {
        match Device::new_cuda(0) {
            Ok(device) => {
                info!("Classifiers using CUDA GPU");
                return device;
            }
            Err(e) => warn!(error = %e, "CUDA device unavailable"),
        }
    }

    debug!("Classifiers using CPU");
    Device::Cpu
}
