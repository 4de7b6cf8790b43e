use super::Result;
use super::support::{java_vm, JavaSupport};
use crate::listeners::{ListenerHandle, Listeners};
use crate::{SensorDelay, SensorKind, SensorSample};
use jni::objects::JClass;
use jni::sys::{jfloat, jint};
use jni::JNIEnv;
use std::mem;
use std::panic::catch_unwind;
use std::sync::RwLock;

pub(crate) type ListenerFn = Box<dyn Fn(SensorSample) + Send + Sync>;

/// Keeps a listener registered. The sensors are released once the last subscription is dropped.
#[derive(Debug)]
pub(crate) struct Subscription {
    handle: ListenerHandle,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Err(_e) = unsubscribe(mem::take(&mut self.handle)) {
            #[cfg(feature = "log")]
            log::warn!("error while releasing sensors: {_e:#?}");
        }
    }
}

static LISTENERS: RwLock<Listeners<ListenerFn>> = RwLock::new(Listeners::new());

/// Adds a listener for sensor readings, registering with the sensor service if it is the first.
/// The sampling rate is chosen by the first listener.
pub(crate) fn subscribe(
    delay: SensorDelay,
    listener: impl Fn(SensorSample) + Send + Sync + 'static,
) -> Result<Subscription> {
    let mut listeners = LISTENERS.write().expect("lock poisoned");
    if listeners.is_empty() {
        subscribe_java(delay)?;
    }
    let handle = listeners.add(Box::new(listener))?;
    Ok(Subscription { handle })
}

fn subscribe_java(delay: SensorDelay) -> Result<()> {
    let vm = java_vm()?;
    let mut env = vm.attach_current_thread()?;
    let support = JavaSupport::get()?;
    support.subscribe(&mut env, delay)?;
    #[cfg(feature = "log")]
    log::debug!("registered accelerometer and magnetometer listener ({delay:?})");
    Ok(())
}

fn unsubscribe(handle: ListenerHandle) -> Result<()> {
    let mut listeners = LISTENERS.write().expect("lock poisoned");
    if listeners.remove(handle) {
        unsubscribe_java()?;
    }
    Ok(())
}

fn unsubscribe_java() -> Result<()> {
    let vm = java_vm()?;
    let mut env = vm.attach_current_thread()?;
    let support = JavaSupport::get()?;
    support.unsubscribe(&mut env)?;
    #[cfg(feature = "log")]
    log::debug!("unregistered accelerometer and magnetometer listener");
    Ok(())
}

pub(crate) fn push_sample(sample: SensorSample) {
    let Ok(listeners) = LISTENERS.read() else {
        return;
    };
    for listener in listeners.iter() {
        listener(sample);
    }
}

// This method is called from Java using a `native` method.
//
// The [JNI Design Overview](https://docs.oracle.com/javase/1.5.0/docs/guide/jni/spec/design.html)
// documents the name mangling scheme.
#[no_mangle]
pub extern "system" fn Java_rs_tilt_TiltSupport_onSensorSample(
    _env: JNIEnv,
    _class: JClass,
    sensor_type: jint,
    x: jfloat,
    y: jfloat,
    z: jfloat,
) {
    let sample = SensorSample::new(SensorKind::from_android_type(sensor_type), [x, y, z]);
    _ = catch_unwind(|| push_sample(sample));
}
