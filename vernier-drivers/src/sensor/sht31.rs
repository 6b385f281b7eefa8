//! Sensirion SHT31 temperature/humidity sensor
//!
//! Single-shot, high repeatability, no clock stretching. Conversion is
//! integer only, in hundredths of a unit:
//!
//! - T  = -45 + 175 * raw / 65535 (°C)
//! - RH = 100 * raw / 65535 (%)
//!
//! Each 16-bit word from the sensor is followed by a CRC-8 (poly 0x31,
//! init 0xFF).

use vernier_hal::I2cBus;

/// Default address (ADDR pin low)
pub const DEFAULT_ADDRESS: u8 = 0x44;

/// Alternate address (ADDR pin high)
pub const ALT_ADDRESS: u8 = 0x45;

/// Single shot, high repeatability, clock stretching disabled
const CMD_MEASURE_HIGH: [u8; 2] = [0x24, 0x00];

/// Worst-case conversion time at high repeatability
pub const MEASUREMENT_DURATION_MS: u32 = 15;

const CRC_POLY: u8 = 0x31;
const CRC_INIT: u8 = 0xFF;

/// SHT31 errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sht31Error<E> {
    /// Bus transaction failed
    Bus(E),
    /// Checksum mismatch in the response
    Crc,
}

#[cfg(feature = "defmt")]
impl<E> defmt::Format for Sht31Error<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Bus(_) => defmt::write!(f, "Bus"),
            Self::Crc => defmt::write!(f, "Crc"),
        }
    }
}

/// One converted reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sht31Reading {
    /// Temperature in 0.01 °C
    pub temperature_centi: i32,
    /// Relative humidity in 0.01 %
    pub humidity_centi: u16,
}

/// CRC-8 over a data word
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc = CRC_INIT;
    for &byte in data {
        crc ^= byte;
        for _ in 0..8 {
            crc = if crc & 0x80 != 0 {
                (crc << 1) ^ CRC_POLY
            } else {
                crc << 1
            };
        }
    }
    crc
}

/// Check a `[msb, lsb, crc]` triplet
pub fn check_crc(word: &[u8; 3]) -> bool {
    crc8(&word[..2]) == word[2]
}

/// Raw temperature word to 0.01 °C
pub const fn temperature_centi(raw: u16) -> i32 {
    -4500 + ((17_500 * raw as u32) / 65_535) as i32
}

/// Raw humidity word to 0.01 %RH
pub const fn humidity_centi(raw: u16) -> u16 {
    ((10_000 * raw as u32) / 65_535) as u16
}

/// SHT31 driver
pub struct Sht31<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2cBus> Sht31<I2C> {
    /// Create a driver at the default address
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    /// Create a driver at a specific address
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Device address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Trigger a conversion
    ///
    /// The result is available after [`MEASUREMENT_DURATION_MS`].
    pub fn start_measurement(&mut self) -> Result<(), Sht31Error<I2C::Error>> {
        self.i2c
            .write(self.address, &CMD_MEASURE_HIGH)
            .map_err(Sht31Error::Bus)
    }

    /// Fetch and convert a finished conversion
    pub fn read_measurement(&mut self) -> Result<Sht31Reading, Sht31Error<I2C::Error>> {
        let mut buf = [0u8; 6];
        self.i2c
            .read(self.address, &mut buf)
            .map_err(Sht31Error::Bus)?;

        let temp = [buf[0], buf[1], buf[2]];
        let hum = [buf[3], buf[4], buf[5]];
        if !check_crc(&temp) || !check_crc(&hum) {
            #[cfg(feature = "defmt")]
            defmt::warn!("sht31 crc mismatch: {:x}", buf);
            return Err(Sht31Error::Crc);
        }

        Ok(Sht31Reading {
            temperature_centi: temperature_centi(u16::from_be_bytes([temp[0], temp[1]])),
            humidity_centi: humidity_centi(u16::from_be_bytes([hum[0], hum[1]])),
        })
    }

    /// Blocking measurement
    ///
    /// `delay_ms` is called once between trigger and readout.
    pub fn measure(
        &mut self,
        delay_ms: impl FnOnce(u32),
    ) -> Result<Sht31Reading, Sht31Error<I2C::Error>> {
        self.start_measurement()?;
        delay_ms(MEASUREMENT_DURATION_MS);
        self.read_measurement()
    }

    /// Release the bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MockI2c {
        last_write: Option<(u8, [u8; 2])>,
        response: [u8; 6],
        fail: bool,
    }

    impl I2cBus for MockI2c {
        type Error = ();

        fn write(&mut self, address: u8, data: &[u8]) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.last_write = Some((address, [data[0], data[1]]));
            Ok(())
        }

        fn read(&mut self, _address: u8, buf: &mut [u8]) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            buf.copy_from_slice(&self.response);
            Ok(())
        }
    }

    #[test]
    fn test_crc8_reference() {
        // datasheet example
        assert_eq!(crc8(&[0xBE, 0xEF]), 0x92);
        assert!(check_crc(&[0xBE, 0xEF, 0x92]));
        assert!(!check_crc(&[0xBE, 0xEF, 0x93]));
    }

    #[test]
    fn test_conversions() {
        assert_eq!(temperature_centi(0), -4500);
        assert_eq!(temperature_centi(0xFFFF), 13000);
        assert_eq!(temperature_centi(0x6666), 2500);
        assert_eq!(humidity_centi(0), 0);
        assert_eq!(humidity_centi(0xFFFF), 10000);
        assert_eq!(humidity_centi(0x8000), 5000);
    }

    #[test]
    fn test_measure() {
        let i2c = MockI2c {
            response: [0x66, 0x66, 0x93, 0x80, 0x00, 0xA2],
            ..Default::default()
        };
        let mut sensor = Sht31::new(i2c);
        let mut waited = 0;

        let reading = sensor.measure(|ms| waited = ms).unwrap();
        assert_eq!(waited, MEASUREMENT_DURATION_MS);
        assert_eq!(
            reading,
            Sht31Reading {
                temperature_centi: 2500,
                humidity_centi: 5000,
            }
        );
        assert_eq!(sensor.release().last_write, Some((0x44, [0x24, 0x00])));
    }

    #[test]
    fn test_crc_mismatch() {
        let i2c = MockI2c {
            response: [0x66, 0x66, 0x93, 0x80, 0x00, 0x00],
            ..Default::default()
        };
        let mut sensor = Sht31::with_address(i2c, ALT_ADDRESS);
        assert_eq!(sensor.read_measurement(), Err(Sht31Error::Crc));
    }

    #[test]
    fn test_bus_error() {
        let i2c = MockI2c {
            fail: true,
            ..Default::default()
        };
        let mut sensor = Sht31::new(i2c);
        assert_eq!(sensor.measure(|_| {}), Err(Sht31Error::Bus(())));
    }
}
