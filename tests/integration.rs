//! Full control-flow tests over the mock platform
//!
//! Drives the real scheduler, log, and command protocol end to end with
//! scripted sensors and an in-memory modem, the way the flight firmware
//! wires them together.

use stratolink::communication::sms::{CommandProtocol, ProtocolState, SmsLink};
use stratolink::core::PayloadConfig;
use stratolink::devices::mock::{
    MockBaroSensor, MockDofSensor, MockEnvSensor, MockGasSensor, MockGpsSensor, MockLightSensor,
};
use stratolink::devices::{PositionReading, SensorSuite, StatusIndicator};
use stratolink::platform::mock::{MockGpio, MockStorage, MockTimer, MockUart};
use stratolink::telemetry::{
    wait_for_start, TelemetryLog, TelemetryScheduler, AUX_FIELDS, DOF_FIELDS, POSITION_FIELDS,
};

fn test_config() -> PayloadConfig {
    PayloadConfig {
        dof_period_ms: 100,
        aux_period_ms: 500,
        gps_period_ms: 1_000,
        settle_ms: 10,
        first_pass: false,
        ..PayloadConfig::default()
    }
}

fn suite() -> SensorSuite<
    MockDofSensor,
    MockBaroSensor,
    MockGasSensor,
    MockEnvSensor,
    MockLightSensor,
    MockGpsSensor,
> {
    SensorSuite {
        dof: MockDofSensor::new(),
        baro: MockBaroSensor::new(),
        gas: MockGasSensor::new(),
        env: MockEnvSensor::new(),
        light: MockLightSensor::new(),
        gps: MockGpsSensor::new(),
    }
}

struct Rig {
    config: PayloadConfig,
    scheduler: TelemetryScheduler,
    log: TelemetryLog<MockStorage>,
    protocol: CommandProtocol,
    link: SmsLink<MockUart>,
    timer: MockTimer,
    indicator: StatusIndicator<MockGpio>,
}

fn rig() -> Rig {
    let config = test_config();
    Rig {
        scheduler: TelemetryScheduler::new(config.clone()),
        log: TelemetryLog::new(MockStorage::new(), &config),
        protocol: CommandProtocol::new(&config),
        link: SmsLink::new(MockUart::new(Default::default()), config.settle_ms),
        timer: MockTimer::new(),
        indicator: StatusIndicator::new(MockGpio::new_output()),
        config,
    }
}

#[test]
fn test_startup_then_one_full_cycle() {
    let mut r = rig();
    let mut sensors = suite();

    let mut trigger = MockGpio::new_input();
    trigger.set_input_state(true);
    wait_for_start(&trigger, &mut r.timer).unwrap();

    r.protocol.power_on(&mut r.link, &mut r.timer).unwrap();
    assert_eq!(r.protocol.state(), ProtocolState::Operational);

    r.scheduler.init_sensors(&mut sensors).unwrap();
    r.scheduler
        .run_cycle(
            &mut r.timer,
            &mut sensors,
            &mut r.log,
            &mut r.protocol,
            &mut r.link,
            &mut r.indicator,
        )
        .unwrap();

    // 1 s outer period over 500 ms Aux tiers of 100 ms DOF ticks
    let dof_lines = r.log.storage().lines(r.config.dof_log_path);
    let aux_lines = r.log.storage().lines(r.config.aux_log_path);
    let gps_lines = r.log.storage().lines(r.config.gps_log_path);
    assert_eq!(dof_lines.len(), 10);
    assert_eq!(aux_lines.len(), 2);
    assert_eq!(gps_lines.len(), 1);

    assert_eq!(dof_lines[0].split(',').count(), DOF_FIELDS);
    assert_eq!(aux_lines[0].split(',').count(), AUX_FIELDS);
    assert_eq!(gps_lines[0].split(',').count(), POSITION_FIELDS);
    assert_eq!(r.scheduler.failures().total(), 0);
}

#[test]
fn test_first_pass_handshake_gate() {
    let config = PayloadConfig {
        first_pass: true,
        ..test_config()
    };
    let mut protocol = CommandProtocol::new(&config);
    let mut link = SmsLink::new(MockUart::new(Default::default()), config.settle_ms);
    let mut timer = MockTimer::new();
    let mut indicator = StatusIndicator::new(MockGpio::new_output());

    protocol.power_on(&mut link, &mut timer).unwrap();
    assert_eq!(protocol.state(), ProtocolState::AwaitingHandshake);

    link.uart()
        .inject_rx_data(b"+CMT: \"+15550000000\",\"\",\"25/08/23,15:00:00-24\"\r\nReady\r\n");
    protocol
        .await_handshake(&mut link, &mut timer, &mut indicator)
        .unwrap();
    assert_eq!(protocol.state(), ProtocolState::Operational);
}

#[test]
fn test_remote_command_round_trip_across_cycles() {
    let mut r = rig();
    let mut sensors = suite();
    r.protocol.power_on(&mut r.link, &mut r.timer).unwrap();
    r.scheduler.init_sensors(&mut sensors).unwrap();
    r.link.uart().clear_tx_buffer();

    // Command arrives while the payload is sampling; it is picked up at the
    // next cycle boundary and confirmed one cycle later
    r.link
        .uart()
        .inject_rx_data(b"+CMT: \"+15550000000\",\"\",\"25/08/23,15:02:00-24\"\r\n1\r\n");

    r.scheduler
        .run_cycle(
            &mut r.timer,
            &mut sensors,
            &mut r.log,
            &mut r.protocol,
            &mut r.link,
            &mut r.indicator,
        )
        .unwrap();
    assert_eq!(r.protocol.state(), ProtocolState::AwaitingConfirmation);
    assert!(r.indicator.pin().transitions() > 0);
    assert!(!r.link.uart().tx_string().contains("LED"));

    r.scheduler
        .run_cycle(
            &mut r.timer,
            &mut sensors,
            &mut r.log,
            &mut r.protocol,
            &mut r.link,
            &mut r.indicator,
        )
        .unwrap();
    assert_eq!(r.protocol.state(), ProtocolState::Operational);
    assert!(r.link.uart().tx_string().contains("LED"));
}

#[test]
fn test_position_link_uses_latest_accepted_fix() {
    let mut r = rig();
    let mut sensors = suite();
    r.protocol.power_on(&mut r.link, &mut r.timer).unwrap();
    r.scheduler.init_sensors(&mut sensors).unwrap();

    // First cycle records a good fix
    sensors.gps.push_outcome(Ok(PositionReading {
        date: 230825,
        time: 15100000,
        latitude: 40.014984,
        longitude: -105.270546,
        satellites: 8,
        hdop: 1.3,
        altitude: 1650.0,
        speed: 0.1,
        course: 0.0,
    }));
    r.scheduler
        .run_cycle(
            &mut r.timer,
            &mut sensors,
            &mut r.log,
            &mut r.protocol,
            &mut r.link,
            &mut r.indicator,
        )
        .unwrap();

    // Position request in the next cycle answers with that fix
    r.link.uart().clear_tx_buffer();
    r.link
        .uart()
        .inject_rx_data(b"+CMT: \"+15550000000\",\"\",\"25/08/23,15:03:00-24\"\r\n2\r\n");
    r.scheduler
        .run_cycle(
            &mut r.timer,
            &mut sensors,
            &mut r.log,
            &mut r.protocol,
            &mut r.link,
            &mut r.indicator,
        )
        .unwrap();

    assert!(r
        .link
        .uart()
        .tx_string()
        .contains("maps?q=40.014984,-105.270546"));
}

#[test]
fn test_sensor_dropout_degrades_but_keeps_logging() {
    let mut r = rig();
    let mut sensors = suite();
    r.protocol.power_on(&mut r.link, &mut r.timer).unwrap();
    r.scheduler.init_sensors(&mut sensors).unwrap();

    for _ in 0..3 {
        sensors.light.push_outcome(Err(stratolink::devices::SensorError::Bus));
    }
    r.scheduler
        .run_cycle(
            &mut r.timer,
            &mut sensors,
            &mut r.log,
            &mut r.protocol,
            &mut r.link,
            &mut r.indicator,
        )
        .unwrap();

    // Both Aux records of the cycle were still written
    let aux_lines = r.log.storage().lines(r.config.aux_log_path);
    assert_eq!(aux_lines.len(), 2);
    assert_eq!(
        r.scheduler
            .failures()
            .failures(stratolink::devices::SensorFamily::Light),
        2
    );
}
