use assign_resources::assign_resources;
use embassy_rp::peripherals;
use embassy_rp::Peri;

assign_resources! {
    strobe: StrobeResources {
        led1: PIN_16,
        led2: PIN_17,
    },
    inputs: InputResources {
        next_button: PIN_12,
        previous_button: PIN_13,
        off_button: PIN_14,
    },
}
