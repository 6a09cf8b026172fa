use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use parking_lot::Mutex;

use crate::{AcquireError, BusHandle, BusSpeed};

#[derive(Debug, Clone)]
pub struct DeviceConfig {
    pub slave_address: u16,
    /// Adapter to open, by node name (`i2c-1`) or sysfs name. `None` accepts
    /// any adapter as long as there is exactly one.
    pub friendly_name: Option<String>,
    pub dev_root: PathBuf,
    pub sysfs_root: PathBuf,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            slave_address: 0,
            friendly_name: None,
            dev_root: PathBuf::from("/dev"),
            sysfs_root: PathBuf::from("/sys/class/i2c-adapter"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusInfo {
    pub bus_id: String,
    pub node: PathBuf,
    pub name: Option<String>,
    pub speed: BusSpeed,
}

impl BusInfo {
    fn matches(&self, friendly_name: &str) -> bool {
        self.bus_id == friendly_name || self.name.as_deref() == Some(friendly_name)
    }

    pub fn device_id(&self) -> String {
        match &self.name {
            Some(name) => format!("{} ({name})", self.node.display()),
            None => self.node.display().to_string(),
        }
    }
}

/// I2C adapters under `dev_root`, in bus number order.
pub fn list_buses(config: &DeviceConfig) -> Vec<BusInfo> {
    let Ok(entries) = fs::read_dir(&config.dev_root) else {
        return Vec::new();
    };

    let mut buses: Vec<(u32, BusInfo)> = entries
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let bus_id = entry.file_name().into_string().ok()?;
            let number = bus_id.strip_prefix("i2c-")?.parse().ok()?;
            let adapter = config.sysfs_root.join(&bus_id);
            Some((
                number,
                BusInfo {
                    node: entry.path(),
                    name: read_name(&adapter),
                    speed: read_speed(&adapter),
                    bus_id,
                },
            ))
        })
        .collect();
    buses.sort_by_key(|(number, _)| *number);
    buses.into_iter().map(|(_, bus)| bus).collect()
}

fn read_name(adapter: &Path) -> Option<String> {
    let name = fs::read_to_string(adapter.join("name")).ok()?;
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_string())
}

// Device-tree cells are big-endian.
fn read_speed(adapter: &Path) -> BusSpeed {
    fs::read(adapter.join("of_node/clock-frequency"))
        .ok()
        .and_then(|cell| <[u8; 4]>::try_from(cell.as_slice()).ok())
        .map_or(BusSpeed::StandardMode, |cell| {
            BusSpeed::from_hz(u32::from_be_bytes(cell))
        })
}

/// The single adapter matching the configured friendly name.
pub fn select_bus(config: &DeviceConfig) -> Result<BusInfo, AcquireError> {
    let mut candidates: Vec<BusInfo> = list_buses(config)
        .into_iter()
        .filter(|bus| {
            config
                .friendly_name
                .as_deref()
                .map_or(true, |name| bus.matches(name))
        })
        .collect();
    debug!("{} candidate I2C adapters", candidates.len());

    match candidates.pop() {
        Some(bus) if candidates.is_empty() => Ok(bus),
        last => Err(AcquireError::NotFound {
            address: config.slave_address,
            friendly_name: config.friendly_name.clone(),
            matches: candidates.len() + usize::from(last.is_some()),
        }),
    }
}

/// Open the configured slave device for exclusive use.
pub fn acquire(config: &DeviceConfig) -> Result<Box<dyn BusHandle>, AcquireError> {
    let bus = select_bus(config)?;
    let claim = Claim::take(&bus.bus_id, config.slave_address)?;
    info!(
        "opening {} for slave address 0x{:x}",
        bus.node.display(),
        config.slave_address
    );
    open(bus, config.slave_address, claim)
}

#[cfg(target_os = "linux")]
fn open(bus: BusInfo, address: u16, claim: Claim) -> Result<Box<dyn BusHandle>, AcquireError> {
    let handle = crate::linux::LinuxBus::open(bus, address, claim)?;
    Ok(Box::new(handle))
}

#[cfg(not(target_os = "linux"))]
fn open(bus: BusInfo, address: u16, _claim: Claim) -> Result<Box<dyn BusHandle>, AcquireError> {
    Err(AcquireError::Open {
        address,
        bus_id: bus.bus_id,
        source: std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "I2C access is only available on Linux",
        ),
    })
}

static CLAIMS: Mutex<BTreeSet<(String, u16)>> = parking_lot::const_mutex(BTreeSet::new());

/// Process-wide hold on one address of one bus, released on drop.
#[derive(Debug)]
pub(crate) struct Claim {
    bus_id: String,
    address: u16,
}

impl Claim {
    pub(crate) fn take(bus_id: &str, address: u16) -> Result<Self, AcquireError> {
        let mut claims = CLAIMS.lock();
        if !claims.insert((bus_id.to_string(), address)) {
            return Err(AcquireError::Busy {
                address,
                bus_id: bus_id.to_string(),
            });
        }
        Ok(Self {
            bus_id: bus_id.to_string(),
            address,
        })
    }
}

impl Drop for Claim {
    fn drop(&mut self) {
        CLAIMS.lock().remove(&(std::mem::take(&mut self.bus_id), self.address));
    }
}
