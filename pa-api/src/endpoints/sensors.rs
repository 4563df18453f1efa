//! Sensor data endpoints.

use pa_core::error::PaResult;

use crate::client::ApiClient;
use crate::operation::Operation;
use crate::params::RequestParams;
use crate::query::{SensorQuery, SensorsQuery};
use crate::response::ApiResult;

impl ApiClient {
    /// Latest data for one sensor.
    ///
    /// With an empty query the API returns every field it has for the sensor.
    pub fn get_sensor_data(&self, sensor_index: u64, query: &SensorQuery) -> PaResult<ApiResult> {
        let mut params = RequestParams::new();
        params.set("sensor_index", sensor_index);
        query.apply(&mut params)?;
        self.call(Operation::GetSensorData, params)
    }

    /// Latest data for every sensor matching the filters.
    ///
    /// The body is tabular; see [`ApiResult::records`].
    pub fn get_sensors_data(&self, query: &SensorsQuery) -> PaResult<ApiResult> {
        let mut params = RequestParams::new();
        query.apply(&mut params)?;
        self.call(Operation::GetSensorsData, params)
    }
}

