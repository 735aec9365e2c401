//! Viewer overlay UI: dropzone hint, loading indicator, progress bar,
//! status notices and the FPS readout.

pub mod overlay;
