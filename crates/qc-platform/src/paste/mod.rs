mod enigo_injector;

pub use enigo_injector::EnigoPasteInjector;
