//! STM32F4-Discovery firmware: feeds 16 kHz mono ADC samples through
//! [`knockdog_core::Analyzer`] and drives the board LEDs on knock/ring
//! detections. The user button toggles high-sensitivity mode.
#![no_std]
#![no_main]

use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_stm32::adc::{Adc, SampleTime};
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::{Level, Output, Pull, Speed};
use embassy_time::{Duration, Ticker};
use knockdog_core::{Analyzer, Detections, Flags};
use panic_probe as _;

/// Discovery board LEDs: PD12 (green), PD13 (orange), PD14 (red), PD15 (blue).
struct Leds<'a> {
    green: Output<'a>,
    orange: Output<'a>,
    red: Output<'a>,
    blue: Output<'a>,
}

impl Leds<'_> {
    fn show(&mut self, detections: Detections, high_sensitivity: bool) {
        self.orange.set_level(if high_sensitivity { Level::High } else { Level::Low });
        self.red.set_level(if detections.contains(Detections::KNOCK) { Level::High } else { Level::Low });
        self.blue.set_level(if detections.contains(Detections::RING) { Level::High } else { Level::Low });
    }
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_stm32::init(embassy_stm32::Config::default());

    let mut leds = Leds {
        green: Output::new(p.PD12, Level::High, Speed::Low),
        orange: Output::new(p.PD13, Level::Low, Speed::Low),
        red: Output::new(p.PD14, Level::Low, Speed::Low),
        blue: Output::new(p.PD15, Level::Low, Speed::Low),
    };

    let mut mode_button = ExtiInput::new(p.PA0, p.EXTI0, Pull::Down);

    let mut adc = Adc::new(p.ADC1);
    let mut mic = p.PA1;

    let mut analyzer = Analyzer::new();
    let mut high_sensitivity = false;
    let mut ticker = Ticker::every(Duration::from_hz(u64::from(knockdog_core::SAMPLE_RATE)));

    defmt::info!("knockdog firmware started");

    loop {
        if mode_button.is_high() {
            high_sensitivity = !high_sensitivity;
            mode_button.wait_for_falling_edge().await;
        }

        let sample = adc.blocking_read(&mut mic, SampleTime::CYCLES84);
        // ADC samples are unsigned 12-bit; recenter around zero so the
        // analyzer sees the same signed PCM range as the hosted pipeline.
        let centered = (i32::from(sample) - 2048) * 16;
        let input = [centered.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16];

        let flags = if high_sensitivity { Flags::HIGH_SENSITIVITY } else { Flags::empty() };
        let detections = analyzer.process(&input, None, flags, None);

        if !detections.is_empty() {
            play_detection_clip(detections);
        }
        leds.show(detections, high_sensitivity);

        ticker.next().await;
    }
}

/// Plays a canned "who's there?" clip over the board's I2S DAC when a knock
/// or ring fires. The original eDog hardware did this through `WavePlayBack`
/// driving a wired codec; porting that DMA/I2S setup is tracked separately
/// and out of scope here, so this is a stub.
fn play_detection_clip(_detections: Detections) {}
