pub mod remote;

pub use remote::RemoteMapsProvider;
