//! Livox SDK2 driver
//!
//! Wraps the vendor C SDK as a `LidarDriver`. Only compiled when the
//! `livox-sdk` feature is enabled; requires `liblivox_lidar_sdk_shared`
//! on the linker path.
//!
//! The SDK invokes the registered callbacks on its own threads. Each
//! trampoline rebuilds a borrowed packet view and forwards it to the
//! `EventSink`; panics are caught so nothing unwinds into C.

mod ffi;

use std::ffi::{c_void, CString};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use contracts::{
    ContractError, DeviceControl, DeviceHandle, DeviceInfo, EventSink, LidarDriver,
    PointCloudPacket, PointEncoding,
};
use tracing::{debug, error, info};

use crate::error::DriverError;

const DRIVER_NAME: &str = "livox";

type SinkSlot = Box<Arc<dyn EventSink>>;

/// Livox SDK2 driver
///
/// The SDK is process-global; only one instance should be initialized.
pub struct LivoxDriver {
    initialized: AtomicBool,
    /// Every sink ever handed to the SDK. Superseded slots stay alive until
    /// `uninit` because a callback may still be running on them.
    sinks: Mutex<Vec<SinkSlot>>,
}

impl LivoxDriver {
    pub fn new() -> Self {
        Self {
            initialized: AtomicBool::new(false),
            sinks: Mutex::new(Vec::new()),
        }
    }
}

impl Default for LivoxDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl LidarDriver for LivoxDriver {
    fn name(&self) -> &str {
        DRIVER_NAME
    }

    fn init(&self, config_path: &Path) -> Result<(), ContractError> {
        let display = config_path.display().to_string();
        let path = config_path
            .to_str()
            .ok_or_else(|| DriverError::config_rejected(DRIVER_NAME, &display, "path is not UTF-8"))
            .and_then(|p| {
                CString::new(p).map_err(|e| {
                    DriverError::config_rejected(DRIVER_NAME, &display, e.to_string())
                })
            })?;
        let host_ip = CString::default();

        // SAFETY: both strings are NUL-terminated and outlive the call
        let ok = unsafe {
            ffi::LivoxLidarSdkInit(path.as_ptr(), host_ip.as_ptr(), std::ptr::null())
        };
        if !ok {
            return Err(DriverError::config_rejected(
                DRIVER_NAME,
                display,
                "LivoxLidarSdkInit returned false",
            )
            .into());
        }

        self.initialized.store(true, Ordering::SeqCst);
        info!(config = %config_path.display(), "Livox SDK initialized");
        Ok(())
    }

    fn set_event_sink(&self, sink: Arc<dyn EventSink>) {
        let slot: SinkSlot = Box::new(sink);
        let client_data = &*slot as *const Arc<dyn EventSink> as *mut c_void;

        let mut sinks = self.sinks.lock().unwrap_or_else(PoisonError::into_inner);
        // SAFETY: the slot is kept in `sinks` until after LivoxLidarSdkUninit
        unsafe {
            ffi::SetLivoxLidarInfoChangeCallback(Some(info_trampoline), client_data);
            ffi::SetLivoxLidarPointCloudCallBack(Some(point_cloud_trampoline), client_data);
        }
        sinks.push(slot);
        debug!("Livox callbacks registered");
    }

    fn start(&self) -> Result<(), ContractError> {
        if !self.initialized.load(Ordering::SeqCst) {
            return Err(DriverError::NotInitialized {
                driver: DRIVER_NAME.to_string(),
            }
            .into());
        }

        // SAFETY: SDK initialized above
        if unsafe { ffi::LivoxLidarSdkStart() } {
            info!("Livox SDK started");
            Ok(())
        } else {
            Err(ContractError::driver_start(
                DRIVER_NAME,
                "LivoxLidarSdkStart returned false",
            ))
        }
    }

    fn control(&self) -> Arc<dyn DeviceControl> {
        Arc::new(LivoxDeviceControl)
    }

    fn uninit(&self) {
        // Uninit is also the cleanup path after a failed init
        // SAFETY: LivoxLidarSdkUninit tolerates a partially initialized SDK
        unsafe { ffi::LivoxLidarSdkUninit() };
        self.initialized.store(false, Ordering::SeqCst);

        // SDK threads are gone, the callback targets can be released
        self.sinks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        debug!("Livox SDK uninitialized");
    }
}

/// Device commands through `SetLivoxLidarPclDataType`
pub struct LivoxDeviceControl;

impl DeviceControl for LivoxDeviceControl {
    fn set_point_encoding(
        &self,
        handle: DeviceHandle,
        encoding: PointEncoding,
    ) -> Result<(), ContractError> {
        // SAFETY: no callback, no client data
        let status = unsafe {
            ffi::SetLivoxLidarPclDataType(
                handle.as_u32(),
                encoding.tag() as std::ffi::c_int,
                None,
                std::ptr::null_mut(),
            )
        };

        if status == ffi::LIVOX_STATUS_SUCCESS {
            Ok(())
        } else {
            Err(ContractError::device_command(
                handle.as_u32(),
                DriverError::SdkStatus {
                    call: "SetLivoxLidarPclDataType",
                    status,
                }
                .to_string(),
            ))
        }
    }
}

/// NUL-terminated fixed-size C string field to String
fn fixed_c_str(raw: &[u8]) -> String {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..end]).into_owned()
}

unsafe extern "C" fn info_trampoline(
    handle: u32,
    info: *const ffi::LivoxLidarInfo,
    client_data: *mut c_void,
) {
    if info.is_null() || client_data.is_null() {
        return;
    }
    let sink = &*(client_data as *const Arc<dyn EventSink>);
    let raw = std::ptr::read_unaligned(info);

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let info = DeviceInfo {
            dev_type: raw.dev_type,
            serial: fixed_c_str(&raw.sn),
            lidar_ip: fixed_c_str(&raw.lidar_ip),
        };
        sink.on_device_info(DeviceHandle(handle), &info);
    }));
    if result.is_err() {
        error!(handle, "panic in device info handler");
    }
}

unsafe extern "C" fn point_cloud_trampoline(
    handle: u32,
    dev_type: u8,
    data: *mut ffi::LivoxLidarEthernetPacket,
    client_data: *mut c_void,
) {
    if client_data.is_null() {
        return;
    }
    let sink = &*(client_data as *const Arc<dyn EventSink>);

    let header = if data.is_null() {
        None
    } else {
        Some(std::ptr::read_unaligned(data))
    };

    // The SDK guarantees `dot_num` samples of the tagged layout after the header
    let payload: &[u8] = match header {
        Some(header) => {
            let stride = PointEncoding::from_tag(header.data_type)
                .map(PointEncoding::sample_stride)
                .unwrap_or(0);
            let base = std::ptr::addr_of!((*data).data) as *const u8;
            std::slice::from_raw_parts(base, header.dot_num as usize * stride)
        }
        None => &[],
    };

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let packet = header.map(|h| PointCloudPacket::new(h.dot_num, h.length, h.data_type, payload));
        sink.on_point_cloud(DeviceHandle(handle), dev_type, packet.as_ref());
    }));
    if result.is_err() {
        error!(handle, "panic in point cloud handler");
    }
}
