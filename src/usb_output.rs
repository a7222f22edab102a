//! USB HID keyboard output implementation.

use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::class::hid::{
    Config, HidBootProtocol, HidSubclass, HidWriter, ReportId, RequestHandler, State,
};
use embassy_usb::control::OutResponse;
use embassy_usb::driver::EndpointError;
use embassy_usb::Builder;
use shortcut_pad_core::{BootKeyboardReport, HidKeyboard, KeyChord, TransportError};
use usbd_hid::descriptor::{KeyboardReport, SerializedDescriptor};

use crate::config::{USB_HID_PACKET_SIZE, USB_HID_POLL_MS};

/// HID writer for the boot keyboard interface.
pub type KeyboardWriter<'d> = HidWriter<'d, Driver<'d, USB>, { BootKeyboardReport::SIZE }>;

/// Map an endpoint error onto the transport error the emitter understands.
///
/// A disabled endpoint means the host has not configured us yet (or the
/// bus is suspended), which may clear up on its own.
fn endpoint_error_to_transport_error(e: EndpointError) -> TransportError {
    match e {
        EndpointError::Disabled => TransportError::NotReady,
        EndpointError::BufferOverflow => TransportError::ReportTooLarge,
    }
}

/// USB HID boot keyboard.
///
/// Wraps an embassy-usb HID writer and sends [`BootKeyboardReport`]s.
pub struct UsbHidKeyboard<'d> {
    writer: KeyboardWriter<'d>,
    ready: bool,
}

impl<'d> UsbHidKeyboard<'d> {
    /// Create a new USB HID keyboard from the given HID writer.
    pub fn new(writer: KeyboardWriter<'d>) -> Self {
        Self {
            writer,
            ready: false,
        }
    }

    /// Wait until the device is ready (USB enumerated).
    pub async fn wait_ready(&mut self) {
        self.writer.ready().await;
        self.ready = true;
    }

    async fn write(&mut self, report: &BootKeyboardReport) -> Result<(), TransportError> {
        if !self.ready {
            return Err(TransportError::NotReady);
        }
        self.writer
            .write(&report.as_bytes())
            .await
            .map_err(endpoint_error_to_transport_error)
    }
}

impl<'d> HidKeyboard for UsbHidKeyboard<'d> {
    async fn press(&mut self, chord: &KeyChord) -> Result<(), TransportError> {
        self.write(&BootKeyboardReport::from(chord)).await
    }

    async fn release_all(&mut self) -> Result<(), TransportError> {
        self.write(&BootKeyboardReport::released()).await
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}

/// HID request handler (handles SET_REPORT, etc.).
///
/// The host writes the LED state (Caps Lock and friends) through SET_REPORT;
/// it is accepted and ignored since the pad has no LEDs.
pub struct KeyboardRequestHandler;

impl RequestHandler for KeyboardRequestHandler {
    fn get_report(&mut self, _id: ReportId, _buf: &mut [u8]) -> Option<usize> {
        None
    }

    fn set_report(&mut self, _id: ReportId, _data: &[u8]) -> OutResponse {
        OutResponse::Accepted
    }

    fn set_idle_ms(&mut self, _id: Option<ReportId>, _duration_ms: u32) {}

    fn get_idle_ms(&mut self, _id: Option<ReportId>) -> Option<u32> {
        None
    }
}

/// Configure the USB HID keyboard class in the USB builder.
///
/// Uses the standard boot keyboard descriptor so BIOS-level hosts and every
/// desktop OS accept the device without a driver. Returns the HID writer for
/// use by the application.
pub fn configure_usb_hid<'d>(
    builder: &mut Builder<'d, Driver<'d, USB>>,
    state: &'d mut State<'d>,
    request_handler: &'d mut KeyboardRequestHandler,
) -> KeyboardWriter<'d> {
    let config = Config {
        report_descriptor: KeyboardReport::desc(),
        request_handler: Some(request_handler),
        poll_ms: USB_HID_POLL_MS,
        max_packet_size: USB_HID_PACKET_SIZE,
        hid_subclass: HidSubclass::Boot,
        hid_boot_protocol: HidBootProtocol::Keyboard,
    };

    HidWriter::new(builder, state, config)
}
