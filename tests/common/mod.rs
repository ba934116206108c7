#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::time::{sleep, Duration, Instant};

use tello_control::{DroneConnection, Result, TelloError, SILENT_ERROR_REPLY};

/// In-memory drone. Answers from a canned reply table and records every
/// transmission with its timestamp, so tests can check command spacing.
pub struct MockDrone {
    connected: AtomicBool,
    silent_errors: AtomicBool,
    response_delay: Duration,
    responses: Mutex<HashMap<String, String>>,
    sent: Mutex<Vec<(String, Instant)>>,
}

impl MockDrone {
    pub fn new() -> Self {
        let mut responses = HashMap::new();
        for command in ["command", "takeoff", "land", "stop", "emergency"] {
            responses.insert(command.to_string(), "ok".to_string());
        }
        responses.insert("battery?".to_string(), "95".to_string());
        responses.insert("temp?".to_string(), "40-43 C".to_string());
        responses.insert("speed?".to_string(), "100.0".to_string());
        responses.insert("height?".to_string(), "100cm".to_string());
        responses.insert("baro?".to_string(), "12.00".to_string());
        responses.insert("attitude?".to_string(), "pitch:-5;roll:0;yaw:0;".to_string());
        responses.insert(
            "acceleration?".to_string(),
            "agx:-50.00;agy:11.00;agz:-999.00;".to_string(),
        );
        responses.insert("wifi?".to_string(), "90".to_string());
        responses.insert("tof?".to_string(), "100dm".to_string());

        Self {
            connected: AtomicBool::new(false),
            silent_errors: AtomicBool::new(false),
            response_delay: Duration::ZERO,
            responses: Mutex::new(responses),
            sent: Mutex::new(vec![]),
        }
    }

    /// Delay between a command arriving and its reply going out.
    pub fn with_response_delay(mut self, delay: Duration) -> Self {
        self.response_delay = delay;
        self
    }

    pub fn with_silent_errors(self) -> Self {
        self.silent_errors.store(true, Ordering::Relaxed);
        self
    }

    pub fn set_response(&self, command: &str, reply: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert(command.to_string(), reply.to_string());
    }

    /// Timestamps of every transmission, in arrival order.
    pub fn sent_at(&self) -> Vec<Instant> {
        self.sent.lock().unwrap().iter().map(|(_, t)| *t).collect()
    }

    pub fn sent_commands(&self) -> Vec<String> {
        self.sent.lock().unwrap().iter().map(|(c, _)| c.clone()).collect()
    }
}

#[async_trait]
impl DroneConnection for MockDrone {
    async fn connect(&self) -> Result<bool> {
        self.connected.store(true, Ordering::Relaxed);
        Ok(true)
    }

    async fn send_command_and_await(&self, command: &str) -> Result<String> {
        if !self.connected.load(Ordering::Relaxed) {
            if self.silent_errors.load(Ordering::Relaxed) {
                return Ok(SILENT_ERROR_REPLY.to_string());
            }
            return Err(TelloError::NotConnected);
        }

        self.sent
            .lock()
            .unwrap()
            .push((command.to_string(), Instant::now()));

        if self.response_delay > Duration::ZERO {
            sleep(self.response_delay).await;
        }

        let reply = self.responses.lock().unwrap().get(command).cloned();
        Ok(reply.unwrap_or_else(|| SILENT_ERROR_REPLY.to_string()))
    }
}
