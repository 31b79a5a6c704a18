//! Byte-exact bus traffic checks against a mocked I2C peripheral

use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};
use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
use hd44780_i2c::{Builder, Error, Geometry, I2cInterface, Lcd, State};

type Bus = I2cInterface<I2cMock>;

const ADDR: u8 = 0x27;

/// The two writes that latch one nibble with the backlight on
fn nibble(value: u8, data: bool) -> [I2cTransaction; 2] {
    let byte = (value & 0xF0) | 0x08 | u8::from(data);
    [
        I2cTransaction::write(ADDR, vec![byte | 0x04]),
        I2cTransaction::write(ADDR, vec![byte]),
    ]
}

fn byte(value: u8, data: bool) -> Vec<I2cTransaction> {
    let mut txns = nibble(value, data).to_vec();
    txns.extend(nibble(value << 4, data));
    txns
}

fn command(value: u8) -> Vec<I2cTransaction> {
    byte(value, false)
}

fn text(s: &[u8]) -> Vec<I2cTransaction> {
    s.iter().flat_map(|b| byte(*b, true)).collect()
}

fn bring_up() -> Vec<I2cTransaction> {
    let mut txns = vec![I2cTransaction::read(ADDR, vec![0xFF])];
    for _ in 0..3 {
        txns.extend(nibble(0x30, false));
    }
    txns.extend(nibble(0x20, false));
    for cmd in [0x28, 0x08, 0x01, 0x06, 0x0C] {
        txns.extend(command(cmd));
    }
    txns
}

#[test]
fn begin_emits_ordered_bring_up() {
    let expectations = bring_up();
    let mut i2c = I2cMock::new(&expectations);

    let mut lcd = Lcd::new_i2c(i2c.clone(), NoopDelay::new(), Builder::new().build());
    lcd.begin(Geometry::LCD2004).unwrap();
    assert_eq!(lcd.state(), State::Ready);

    i2c.done();
}

#[test]
fn sensor_readout_on_20x4() {
    let mut expectations = bring_up();
    expectations.extend(command(0x80));
    expectations.extend(text(b"Temp: 23.4 C        "));
    expectations.extend(command(0xC0));
    expectations.extend(text(b"Gx: -15.78 deg/s    "));
    expectations.extend(command(0x94));
    expectations.extend(text(b"Ax: 9.80 g          "));
    let mut i2c = I2cMock::new(&expectations);

    let mut lcd = Lcd::new_i2c(i2c.clone(), NoopDelay::new(), Builder::new().build());
    lcd.begin(Geometry::LCD2004).unwrap();
    lcd.print_sensor_data(2345, -1578, 980).unwrap();

    i2c.done();
}

#[test]
fn missing_device_reports_fatal_once() {
    let expectations = [I2cTransaction::read(ADDR, vec![0x00])
        .with_error(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address))];
    let mut i2c = I2cMock::new(&expectations);

    let mut fatal_calls = 0;
    {
        let mut lcd = Lcd::with_handler(
            I2cInterface::new(i2c.clone()),
            NoopDelay::new(),
            |e: &Error<Bus>| {
                assert!(matches!(e, Error::NotResponding));
                fatal_calls += 1;
            },
            Builder::new().build(),
        );
        assert!(matches!(
            lcd.begin(Geometry::LCD2004),
            Err(Error::NotResponding)
        ));
        assert_eq!(lcd.state(), State::Initializing);
    }
    assert_eq!(fatal_calls, 1);

    i2c.done();
}

#[test]
fn custom_address_and_backlight_off() {
    let expectations = [
        I2cTransaction::write(0x3F, vec![0x00]),
        I2cTransaction::write(0x3F, vec![0x08]),
    ];
    let mut i2c = I2cMock::new(&expectations);

    let config = Builder::new().address(0x3F).build();
    let mut lcd = Lcd::new_i2c(i2c.clone(), NoopDelay::new(), config);
    lcd.set_backlight(false).unwrap();
    lcd.set_backlight(true).unwrap();

    i2c.done();
}

#[test]
fn nack_mid_line_stops_traffic() {
    let mut expectations = bring_up();
    expectations.extend(command(0xC0));
    let mut failing = text(b"ab");
    let last = failing.len() - 1;
    failing[last] = failing[last].clone().with_error(ErrorKind::Other);
    expectations.extend(failing);
    let mut i2c = I2cMock::new(&expectations);

    let mut fatal_calls = 0;
    {
        let mut lcd = Lcd::with_handler(
            I2cInterface::new(i2c.clone()),
            NoopDelay::new(),
            |_: &Error<Bus>| fatal_calls += 1,
            Builder::new().build(),
        );
        lcd.begin(Geometry::LCD1602).unwrap();
        let result = lcd.print_line(1, "ab");
        assert!(matches!(result, Err(Error::Bus(ErrorKind::Other))));
    }
    assert_eq!(fatal_calls, 1);

    i2c.done();
}
