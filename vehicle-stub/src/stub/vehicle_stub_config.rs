use std::time::Duration;

#[derive(Debug, Clone)]
pub struct VehicleStubConfig {
    sync_op_timeout: Duration,
    timeout_resolution: Duration,
    initial_capacity: usize,
}

impl VehicleStubConfig {
    pub fn new(sync_op_timeout: Duration,
               timeout_resolution: Duration,
               initial_capacity: usize) -> Self {

        return VehicleStubConfig {
            sync_op_timeout,
            timeout_resolution,
            initial_capacity,
        };
    }

    pub fn get_sync_op_timeout(&self) -> Duration {
        return self.sync_op_timeout;
    }

    pub fn get_timeout_resolution(&self) -> Duration {
        return self.timeout_resolution;
    }

    pub fn get_initial_capacity(&self) -> usize {
        return self.initial_capacity;
    }
}

impl Default for VehicleStubConfig {
    fn default() -> Self {
        return Self::new(
            Duration::from_secs(10),
            Duration::from_millis(1),
            0,
        );
    }
}
