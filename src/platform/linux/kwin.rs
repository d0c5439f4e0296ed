//! KWin keyboard LED query and key simulation over the session bus.

use crate::compositor::CompositorKeyboard;
use crate::error::Result;
use zbus::blocking::Connection;

/// Bus names, object paths and members used by [`KWinKeyboard`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositorEndpoints {
    pub leds_service: String,
    pub leds_path: String,
    pub leds_interface: String,
    pub leds_method: String,
    pub simulate_service: String,
    pub simulate_path: String,
    pub simulate_interface: String,
    pub simulate_method: String,
}

impl Default for CompositorEndpoints {
    fn default() -> Self {
        Self {
            leds_service: "org.kde.KWin".into(),
            leds_path: "/Xkb".into(),
            leds_interface: "org.kde.kwin.Xkb".into(),
            leds_method: "getLeds".into(),
            simulate_service: "com.deepin.daemon.KWayland".into(),
            simulate_path: "/com/deepin/daemon/KWayland/Output".into(),
            simulate_interface: "com.deepin.daemon.KWayland.Output".into(),
            simulate_method: "WlSimulateKey".into(),
        }
    }
}

/// Session-bus client for the compositor keyboard calls.
///
/// Holds a clone of the daemon's session connection; dropping it does not
/// close the bus.
#[derive(Debug, Clone)]
pub struct KWinKeyboard {
    connection: Connection,
    endpoints: CompositorEndpoints,
}

impl KWinKeyboard {
    pub fn new(connection: &Connection) -> Self {
        Self {
            connection: connection.clone(),
            endpoints: CompositorEndpoints::default(),
        }
    }

    pub fn with_endpoints(mut self, endpoints: CompositorEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn endpoints(&self) -> &CompositorEndpoints {
        &self.endpoints
    }
}

impl CompositorKeyboard for KWinKeyboard {
    fn get_leds(&self) -> Result<i32> {
        let ep = &self.endpoints;
        let reply = self.connection.call_method(
            Some(ep.leds_service.as_str()),
            ep.leds_path.as_str(),
            Some(ep.leds_interface.as_str()),
            ep.leds_method.as_str(),
            &(),
        )?;
        let leds = reply.body().deserialize::<i32>()?;
        Ok(leds)
    }

    fn simulate_key(&self, code: i32) -> Result<()> {
        let ep = &self.endpoints;
        log::debug!("{}.{}({code})", ep.simulate_interface, ep.simulate_method);
        self.connection.call_method(
            Some(ep.simulate_service.as_str()),
            ep.simulate_path.as_str(),
            Some(ep.simulate_interface.as_str()),
            ep.simulate_method.as_str(),
            &(code,),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let ep = CompositorEndpoints::default();
        assert_eq!(ep.leds_service, "org.kde.KWin");
        assert_eq!(ep.leds_path, "/Xkb");
        assert_eq!(ep.leds_interface, "org.kde.kwin.Xkb");
        assert_eq!(ep.leds_method, "getLeds");
        assert_eq!(ep.simulate_method, "WlSimulateKey");
    }
}
