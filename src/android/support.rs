use super::{ArcError, Result};
use super::subscription::Java_rs_tilt_TiltSupport_onSensorSample;
use crate::SensorDelay;
use jni::objects::{GlobalRef, JClass, JObject, JValue};
use jni::{JNIEnv, JavaVM, NativeMethod};
use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;

/// Values of [`Configuration.orientation`](https://developer.android.com/reference/android/content/res/Configuration#orientation).
pub(crate) const ORIENTATION_PORTRAIT: i32 = 1;
pub(crate) const ORIENTATION_LANDSCAPE: i32 = 2;

/// Handle to our injected `rs.tilt.TiltSupport` instance.
#[derive(Clone)]
pub(crate) struct JavaSupport {
    global_ref: GlobalRef,
}

impl JavaSupport {
    pub(crate) fn get() -> Result<Self> {
        static INSTANCE: LazyLock<Result<JavaSupport, ArcError>> =
            LazyLock::new(|| JavaSupport::from_android_context().map_err(ArcError::from));
        INSTANCE.clone().map_err(Into::into)
    }

    fn from_android_context() -> Result<Self> {
        let vm = java_vm()?;
        let mut env = vm.attach_current_thread()?;
        let context = android_content_context();
        let class = inject_dex_class(&mut env, &context)?;
        let instance = env.new_object(
            &class,
            "(Landroid/content/Context;)V",
            &[JValue::from(&context)],
        )?;
        let global_ref = env.new_global_ref(instance)?;
        Ok(Self { global_ref })
    }

    /// Registers the accelerometer and magnetometer listener.
    /// Fails if the device lacks one of the two sensors.
    pub(crate) fn subscribe(&self, env: &mut JNIEnv, delay: SensorDelay) -> Result<()> {
        let registered = env
            .call_method(
                &self.global_ref,
                "subscribe",
                "(I)Z",
                &[JValue::Int(delay.android_constant())],
            )?
            .z()?;
        if registered {
            Ok(())
        } else {
            Err("device lacks an accelerometer or magnetometer".into())
        }
    }

    pub(crate) fn unsubscribe(&self, env: &mut JNIEnv) -> Result<()> {
        env.call_method(&self.global_ref, "unsubscribe", "()V", &[])?;
        Ok(())
    }

    pub(crate) fn get_configuration_orientation(&self, env: &mut JNIEnv) -> Result<i32> {
        Ok(env
            .call_method(&self.global_ref, "getConfigurationOrientation", "()I", &[])?
            .i()?)
    }
}

pub(crate) fn java_vm() -> Result<JavaVM> {
    let ctx = ndk_context::android_context();
    // SAFETY: ndk_context gives us a valid pointer.
    let vm = unsafe { jni::JavaVM::from_raw(ctx.vm().cast()) }?;
    Ok(vm)
}

pub(crate) fn android_content_context<'local>() -> JObject<'local> {
    let ctx = ndk_context::android_context();
    // SAFETY: ndk_context gives us a valid pointer.
    unsafe { JObject::from_raw(ctx.context().cast()) }
}

/// Loads `TiltSupport` from the DEX bytes embedded by `build.rs`
/// and binds its `native` method to us.
fn inject_dex_class<'a>(env: &mut JNIEnv<'a>, context: &JObject) -> Result<JClass<'a>> {
    const TILT_DEX_BYTES: &[u8] = include_bytes!(env!("TILT_DEX_PATH"));

    // API level 21 can't load DEX from memory, so it goes through the code cache.
    let cache_dir = env
        .call_method(context, "getCodeCacheDir", "()Ljava/io/File;", &[])?
        .l()?;
    let cache_dir = env
        .call_method(&cache_dir, "getAbsolutePath", "()Ljava/lang/String;", &[])?
        .l()?;
    let cache_dir: String = env.get_string(&cache_dir.into())?.into();
    let dex_path = PathBuf::from(&cache_dir).join("tilt.dex");
    fs::write(&dex_path, TILT_DEX_BYTES)?;

    // The loader refuses writable DEX files.
    let mut perms = fs::metadata(&dex_path)?.permissions();
    perms.set_readonly(true);
    fs::set_permissions(&dex_path, perms)?;

    let parent_loader = env
        .call_method(context, "getClassLoader", "()Ljava/lang/ClassLoader;", &[])?
        .l()?;
    let dex_path_jstring = env.new_string(dex_path.to_string_lossy())?;
    let cache_dir_jstring = env.new_string(&cache_dir)?;
    let dex_loader = env.new_object(
        "dalvik/system/DexClassLoader",
        "(Ljava/lang/String;Ljava/lang/String;Ljava/lang/String;Ljava/lang/ClassLoader;)V",
        &[
            (&dex_path_jstring).into(),
            (&cache_dir_jstring).into(),
            (&JObject::null()).into(),
            (&parent_loader).into(),
        ],
    )?;

    let class_name = env.new_string("rs.tilt.TiltSupport")?;
    let class: JClass = env
        .call_method(
            &dex_loader,
            "loadClass",
            "(Ljava/lang/String;)Ljava/lang/Class;",
            &[(&class_name).into()],
        )?
        .l()?
        .into();
    let _ = fs::remove_file(&dex_path);

    let native_methods = [NativeMethod {
        name: "onSensorSample".into(),
        sig: "(IFFF)V".into(),
        fn_ptr: Java_rs_tilt_TiltSupport_onSensorSample as *mut _,
    }];
    env.register_native_methods(&class, &native_methods)?;

    Ok(class)
}
