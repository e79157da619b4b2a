// JNI bridge to the main activity.
//
// The activity exposes instance methods that launch a host surface
// (`launchCameraCapture`, `launchGalleryPicker`, `launchShareSheet`,
// `launchBrowser`, `launchMailCompose`), boolean capability queries
// (`hasCamera`, `hasPhotoLibrary`, `canSendMail`), and static result
// accessors polled from here: a named getter per surface plus
// `getLastError` and `clearResults`. A `getLastError` value of
// "cancelled" means the user dismissed the surface without a result.

use jni::objects::{JClass, JObject, JString, JValue};
use jni::JavaVM;
use ndk_context::android_context;

use crate::host::PresenterError;

const MAIN_ACTIVITY_CLASS: &str = "dev/dioxus/main/MainActivity";

const POLL_INTERVAL_MS: u64 = 100;
// Pickers give the user a minute; mail composition is unbounded.
const PICKER_POLL_ATTEMPTS: u32 = 600;

const CANCELLED_MARKER: &str = "cancelled";

fn jvm() -> Result<JavaVM, PresenterError> {
    let vm_ptr = android_context().vm() as *mut *const jni::sys::JNIInvokeInterface_;
    unsafe { JavaVM::from_raw(vm_ptr) }
        .map_err(|e| PresenterError::Other(format!("JavaVM failed: {}", e)))
}

// find_class fails on native threads, so the activity class is loaded
// through the application class loader.
fn load_activity_class<'a>(env: &mut jni::JNIEnv<'a>) -> Result<JClass<'a>, PresenterError> {
    let thread_cls = env
        .find_class("android/app/ActivityThread")
        .map_err(|e| PresenterError::Other(format!("ActivityThread not found: {}", e)))?;
    let thread = env
        .call_static_method(
            &thread_cls,
            "currentActivityThread",
            "()Landroid/app/ActivityThread;",
            &[],
        )
        .and_then(|v| v.l())
        .map_err(|e| PresenterError::Other(format!("currentActivityThread failed: {}", e)))?;
    let app = env
        .call_method(&thread, "getApplication", "()Landroid/app/Application;", &[])
        .and_then(|v| v.l())
        .map_err(|e| PresenterError::Other(format!("getApplication failed: {}", e)))?;
    let loader = env
        .call_method(&app, "getClassLoader", "()Ljava/lang/ClassLoader;", &[])
        .and_then(|v| v.l())
        .map_err(|e| PresenterError::Other(format!("getClassLoader failed: {}", e)))?;

    let name: JString = env
        .new_string(MAIN_ACTIVITY_CLASS.replace('/', "."))
        .map_err(|e| PresenterError::Other(format!("new_string failed: {}", e)))?;
    let cls_obj = env
        .call_method(
            &loader,
            "loadClass",
            "(Ljava/lang/String;)Ljava/lang/Class;",
            &[JValue::Object(&JObject::from(name))],
        )
        .and_then(|v| v.l())
        .map_err(|e| PresenterError::Other(format!("loadClass failed: {}", e)))?;
    Ok(JClass::from(cls_obj))
}

fn activity_instance<'a>(
    env: &mut jni::JNIEnv<'a>,
) -> Result<(JObject<'a>, JClass<'a>), PresenterError> {
    let cls = load_activity_class(env)?;
    let signature = format!("()L{};", MAIN_ACTIVITY_CLASS);
    let instance = env
        .call_static_method(&cls, "getInstance", &signature, &[])
        .and_then(|v| v.l())
        .map_err(|e| PresenterError::Other(format!("getInstance failed: {}", e)))?;
    if instance.is_null() {
        return Err(PresenterError::Other(
            "MainActivity instance is null - activity not initialized?".to_string(),
        ));
    }
    Ok((instance, cls))
}

fn read_static_string(
    env: &mut jni::JNIEnv,
    cls: &JClass,
    getter: &str,
) -> Result<Option<String>, PresenterError> {
    let obj = env
        .call_static_method(cls, getter, "()Ljava/lang/String;", &[])
        .and_then(|v| v.l())
        .map_err(|e| PresenterError::Other(format!("{} failed: {}", getter, e)))?;
    if obj.is_null() {
        return Ok(None);
    }
    let value: String = env
        .get_string((&obj).into())
        .map_err(|e| PresenterError::Other(format!("String conversion failed: {}", e)))?
        .into();
    Ok(Some(value))
}

fn call_launch(
    env: &mut jni::JNIEnv,
    activity: &JObject,
    method: &str,
    args: &[&str],
) -> Result<(), PresenterError> {
    let owned: Vec<JObject> = args
        .iter()
        .map(|s| {
            env.new_string(s)
                .map(JObject::from)
                .map_err(|e| PresenterError::Other(format!("new_string failed: {}", e)))
        })
        .collect::<Result<_, _>>()?;
    let jargs: Vec<JValue> = owned.iter().map(JValue::Object).collect();
    let sig = format!("({})V", "Ljava/lang/String;".repeat(args.len()));
    env.call_method(activity, method, &sig, &jargs)
        .map_err(|e| PresenterError::Other(format!("{} failed: {}", method, e)))?;
    Ok(())
}

/// Ask the activity a boolean capability question.
pub fn query_bool(method: &str) -> Result<bool, PresenterError> {
    let vm = jvm()?;
    let mut env = vm
        .attach_current_thread()
        .map_err(|e| PresenterError::Other(format!("JNI attach failed: {}", e)))?;
    let (activity, _cls) = activity_instance(&mut env)?;
    env.call_method(&activity, method, "()Z", &[])
        .and_then(|v| v.z())
        .map_err(|e| PresenterError::Other(format!("{} failed: {}", method, e)))
}

/// Launch a fire-and-forget surface (share sheet, browser). Returns as soon
/// as the surface has been handed to the host.
pub fn fire(method: &str, args: &[&str]) -> Result<(), PresenterError> {
    let vm = jvm()?;
    let mut env = vm
        .attach_current_thread()
        .map_err(|e| PresenterError::Other(format!("JNI attach failed: {}", e)))?;
    let (activity, cls) = activity_instance(&mut env)?;
    env.call_static_method(&cls, "clearResults", "()V", &[])
        .map_err(|e| PresenterError::Other(format!("clearResults failed: {}", e)))?;
    call_launch(&mut env, &activity, method, args)
}

/// Launch a surface and poll until it reports a result through `getter`.
///
/// `attempts` of `None` polls until the user dismisses the surface, which
/// is the only way a compose screen ends. Suspends the calling thread; the
/// surface is already dismissed by the time a result is readable.
pub fn run_and_wait(
    method: &str,
    args: &[&str],
    getter: &str,
    attempts: Option<u32>,
) -> Result<String, PresenterError> {
    let vm = jvm()?;
    let mut env = vm
        .attach_current_thread()
        .map_err(|e| PresenterError::Other(format!("JNI attach failed: {}", e)))?;
    let (activity, cls) = activity_instance(&mut env)?;

    env.call_static_method(&cls, "clearResults", "()V", &[])
        .map_err(|e| PresenterError::Other(format!("clearResults failed: {}", e)))?;
    call_launch(&mut env, &activity, method, args)?;

    let mut remaining = attempts;
    loop {
        if let Some(left) = remaining.as_mut() {
            if *left == 0 {
                return Err(PresenterError::Timeout(format!(
                    "{} timed out - no result",
                    method
                )));
            }
            *left -= 1;
        }
        std::thread::sleep(std::time::Duration::from_millis(POLL_INTERVAL_MS));

        if let Some(result) = read_static_string(&mut env, &cls, getter)? {
            return Ok(result);
        }
        if let Some(err) = read_static_string(&mut env, &cls, "getLastError")? {
            if err == CANCELLED_MARKER {
                return Err(PresenterError::Cancelled(format!("{} cancelled", method)));
            }
            return Err(PresenterError::Other(err));
        }
    }
}

/// Poll attempts for the picker surfaces.
pub fn picker_attempts() -> Option<u32> {
    Some(PICKER_POLL_ATTEMPTS)
}
