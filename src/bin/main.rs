#![no_std]
#![no_main]

use defmt::{error, info};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_time::Delay;
use embassy_usb::class::hid::State;
use embassy_usb::{Builder, Config as UsbConfig};
use shortcut_pad::config::{
    BINDING_COUNT, CLOSE_TAB, EMITTER_CONFIG, MUTE_MICROPHONE, RAISE_HAND, TOGGLE_CAMERA,
    USB_MANUFACTURER, USB_MAX_POWER_MA, USB_PID, USB_PRODUCT, USB_SERIAL_NUMBER, USB_VID,
};
use shortcut_pad::{
    configure_usb_hid, pull_up_line, Binding, KeyboardRequestHandler, ShortcutPad, UsbHidKeyboard,
};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

/// USB device configuration buffer.
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// HID state.
static HID_STATE: StaticCell<State> = StaticCell::new();
static REQUEST_HANDLER: StaticCell<KeyboardRequestHandler> = StaticCell::new();

/// The keyboard outlives the emitter, which only borrows it.
static KEYBOARD: StaticCell<UsbHidKeyboard<'static>> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Shortcut pad starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- Button Setup (scan order) ---
    let bindings = [
        Binding::new("mute microphone", pull_up_line(p.PIN_15), MUTE_MICROPHONE),
        Binding::new("toggle camera", pull_up_line(p.PIN_14), TOGGLE_CAMERA),
        Binding::new("raise hand", pull_up_line(p.PIN_16), RAISE_HAND),
        Binding::new("close tab", pull_up_line(p.PIN_17), CLOSE_TAB),
    ];

    // --- USB Setup ---
    let usb_driver = Driver::new(p.USB, Irqs);

    let mut usb_config = UsbConfig::new(USB_VID, USB_PID);
    usb_config.manufacturer = Some(USB_MANUFACTURER);
    usb_config.product = Some(USB_PRODUCT);
    usb_config.serial_number = Some(USB_SERIAL_NUMBER);
    usb_config.max_power = USB_MAX_POWER_MA;
    usb_config.max_packet_size_0 = 64;

    let config_descriptor = CONFIG_DESCRIPTOR.init([0; 256]);
    let bos_descriptor = BOS_DESCRIPTOR.init([0; 256]);
    let msos_descriptor = MSOS_DESCRIPTOR.init([0; 256]);
    let control_buf = CONTROL_BUF.init([0; 64]);

    let mut builder = Builder::new(
        usb_driver,
        usb_config,
        config_descriptor,
        bos_descriptor,
        msos_descriptor,
        control_buf,
    );

    // Configure HID keyboard class
    let hid_state = HID_STATE.init(State::new());
    let request_handler = REQUEST_HANDLER.init(KeyboardRequestHandler);
    let hid_writer = configure_usb_hid(&mut builder, hid_state, request_handler);

    // Build the USB device
    let usb_device = builder.build();

    // Wire the emitter
    let keyboard = KEYBOARD.init(UsbHidKeyboard::new(hid_writer));
    let pad = ShortcutPad::with_config(keyboard, Delay, bindings, EMITTER_CONFIG);

    // Spawn tasks (unwrap the SpawnToken, then spawn)
    spawner.spawn(usb_task(usb_device).unwrap());
    spawner.spawn(shortcut_task(pad).unwrap());

    info!("Shortcut pad initialized, {} buttons", BINDING_COUNT);
}

/// USB device task - runs the USB stack.
#[embassy_executor::task]
async fn usb_task(mut device: embassy_usb::UsbDevice<'static, Driver<'static, USB>>) {
    device.run().await;
}

/// Shortcut task - scans the buttons and sends their chords.
///
/// Keys may be left held on the host when the emitter gives up, so a fatal
/// transport error resets the chip and starts over from enumeration.
#[embassy_executor::task]
async fn shortcut_task(mut pad: ShortcutPad) {
    // Wait for USB to be ready
    pad.keyboard_mut().wait_ready().await;
    info!("USB HID ready, scanning buttons...");

    let e = pad.run().await;
    error!("Shortcut emitter stopped: {:?}", e);
    cortex_m::peripheral::SCB::sys_reset();
}
