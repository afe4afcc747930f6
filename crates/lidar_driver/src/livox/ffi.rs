//! Livox SDK2 C interface
//!
//! Mirrors `livox_lidar_def.h` / `livox_lidar_api.h`. All structs are
//! byte-packed on the C side.

use std::ffi::{c_char, c_int, c_void};

/// `LivoxLidarEthernetPacket` header size, `data` starts right after it
pub const ETHERNET_PACKET_HEADER_LEN: usize = 36;

/// `kLivoxLidarStatusSuccess`
pub const LIVOX_STATUS_SUCCESS: i32 = 0;

#[repr(C, packed)]
#[derive(Clone, Copy)]
pub struct LivoxLidarEthernetPacket {
    pub version: u8,
    pub length: u16,
    pub time_interval: u16,
    pub dot_num: u16,
    pub udp_cnt: u16,
    pub frame_cnt: u8,
    pub data_type: u8,
    pub time_type: u8,
    pub rsvd: [u8; 12],
    pub crc32: u32,
    pub timestamp: [u8; 8],
    pub data: [u8; 1],
}

#[repr(C, packed)]
#[derive(Clone, Copy)]
pub struct LivoxLidarInfo {
    pub dev_type: u8,
    pub sn: [u8; 16],
    pub lidar_ip: [u8; 16],
}

pub type LivoxLidarPointCloudCallBack = Option<
    unsafe extern "C" fn(
        handle: u32,
        dev_type: u8,
        data: *mut LivoxLidarEthernetPacket,
        client_data: *mut c_void,
    ),
>;

pub type LivoxLidarInfoChangeCallback = Option<
    unsafe extern "C" fn(handle: u32, info: *const LivoxLidarInfo, client_data: *mut c_void),
>;

pub type LivoxLidarAsyncControlCallback = Option<
    unsafe extern "C" fn(status: i32, handle: u32, response: *mut c_void, client_data: *mut c_void),
>;

#[link(name = "livox_lidar_sdk_shared")]
extern "C" {
    pub fn LivoxLidarSdkInit(
        path: *const c_char,
        host_ip: *const c_char,
        log_cfg_info: *const c_void,
    ) -> bool;

    pub fn LivoxLidarSdkStart() -> bool;

    pub fn LivoxLidarSdkUninit();

    pub fn SetLivoxLidarPointCloudCallBack(
        cb: LivoxLidarPointCloudCallBack,
        client_data: *mut c_void,
    );

    pub fn SetLivoxLidarInfoChangeCallback(
        cb: LivoxLidarInfoChangeCallback,
        client_data: *mut c_void,
    );

    pub fn SetLivoxLidarPclDataType(
        handle: u32,
        data_type: c_int,
        cb: LivoxLidarAsyncControlCallback,
        client_data: *mut c_void,
    ) -> i32;
}
