//! Inline page script: the browser half of the view-state components.
//!
//! Timings and example queries are substituted from `ui::search_section` so the typed
//! placeholder in the browser runs the same cycle as `PlaceholderAnimator`.

use std::time::Duration;

use crate::ui::search_section::{
    DELETE_DELAY, EXAMPLE_QUERIES, FULL_TEXT_PAUSE, NEXT_EXAMPLE_DELAY, STATIC_PLACEHOLDER,
    TYPE_DELAY,
};

const PAGE_SCRIPT: &str = r#"<script data-page-script>
(() => {
  const TYPE_MS = __TYPE_MS__;
  const DELETE_MS = __DELETE_MS__;
  const PAUSE_MS = __PAUSE_MS__;
  const NEXT_MS = __NEXT_MS__;
  const EXAMPLES = __EXAMPLES__;
  const STATIC_PLACEHOLDER = __STATIC_PLACEHOLDER__;

  const form = document.querySelector('[data-search-form]');
  const input = document.querySelector('[data-query-input]');
  const submit = document.querySelector('[data-search-submit]');

  let timer = null;
  let example = 0;
  let chars = 0;
  let phase = 'typing';

  function step() {
    const text = EXAMPLES[example];
    let delay;
    if (phase === 'typing') {
      chars += 1;
      if (chars >= text.length) {
        phase = 'pausing';
        delay = PAUSE_MS;
      } else {
        delay = TYPE_MS;
      }
    } else if (phase === 'pausing') {
      phase = 'deleting';
      delay = DELETE_MS;
    } else {
      chars = Math.max(chars - 1, 0);
      if (chars === 0) {
        example = (example + 1) % EXAMPLES.length;
        phase = 'typing';
        delay = NEXT_MS;
      } else {
        delay = DELETE_MS;
      }
    }
    input.placeholder = text.slice(0, chars);
    timer = setTimeout(step, delay);
  }

  function stopAnimation() {
    clearTimeout(timer);
    timer = null;
    input.placeholder = STATIC_PLACEHOLDER;
  }

  function startAnimation() {
    if (timer !== null || EXAMPLES.length === 0) return;
    chars = 0;
    phase = 'typing';
    step();
  }

  function syncAnimation() {
    if (document.activeElement !== input && input.value === '') {
      startAnimation();
    } else {
      stopAnimation();
    }
  }

  function showLoading() {
    document.querySelector('[data-results]')?.classList.add('hidden');
    document.querySelector('[data-loading-indicator]')?.classList.remove('hidden');
  }

  if (form && input && submit) {
    input.addEventListener('focus', syncAnimation);
    input.addEventListener('blur', syncAnimation);
    input.addEventListener('input', () => {
      syncAnimation();
      submit.disabled = input.value.trim() === '';
    });
    form.addEventListener('submit', (event) => {
      if (input.value.trim() === '') {
        event.preventDefault();
        return;
      }
      stopAnimation();
      showLoading();
      input.readOnly = true;
      submit.disabled = true;
      submit.textContent = 'Searching...';
    });
    syncAnimation();
  }

  const modal = document.querySelector('[data-modal]');
  const modalBody = modal?.querySelector('[data-modal-body]');
  let path = modal?.dataset.root
    ? { root: modal.dataset.root, trail: JSON.parse(modal.dataset.trail || '[]') }
    : null;

  function syncUrl() {
    const url = new URL(window.location.href);
    url.searchParams.delete('job');
    url.searchParams.delete('trail');
    if (path) {
      url.searchParams.set('job', path.root);
      if (path.trail.length > 0) url.searchParams.set('trail', JSON.stringify(path.trail));
    }
    history.replaceState(null, '', url);
  }

  async function loadCarousel(slot) {
    if (!slot || slot.dataset.loaded === 'true') return;
    const params = new URLSearchParams({
      id: slot.dataset.originId,
      title: slot.dataset.originTitle,
    });
    try {
      const response = await fetch(`/fragments/similar-jobs?${params}`);
      if (!response.ok) throw new Error(`status ${response.status}`);
      slot.innerHTML = await response.text();
    } catch (err) {
      console.warn('Error fetching similar jobs:', err);
      slot.innerHTML = '';
    }
    slot.dataset.loaded = 'true';
  }

  function showDetails(template) {
    modalBody.replaceChildren(template.content.cloneNode(true));
    modal.classList.remove('hidden');
    modal.querySelector('[data-modal-panel]')?.scrollTo(0, 0);
    document.body.classList.add('overflow-hidden');
    loadCarousel(modalBody.querySelector('[data-carousel-slot]'));
  }

  function detailsTemplate(scope, id) {
    return scope.querySelector(`template[data-job-details="${CSS.escape(id)}"]`);
  }

  function openJob(id) {
    const template = detailsTemplate(document, id);
    if (!template) return;
    path = { root: id, trail: [] };
    showDetails(template);
    syncUrl();
  }

  function selectJob(id, from) {
    const carousel = from.closest('[data-carousel]');
    const template = carousel && detailsTemplate(carousel, id);
    if (!template || !path) return;
    path.trail.push(id);
    showDetails(template);
    syncUrl();
  }

  function closeModal() {
    modal.classList.add('hidden');
    modalBody.replaceChildren();
    document.body.classList.remove('overflow-hidden');
    path = null;
    syncUrl();
  }

  function setIndex(carousel, requested) {
    const max = Number(carousel.dataset.maxIndex);
    const visible = Number(carousel.dataset.visible);
    const start = Math.min(Math.max(requested, 0), max);
    carousel.dataset.index = String(start);
    carousel.querySelectorAll('[data-slot-index]').forEach((slot) => {
      const index = Number(slot.dataset.slotIndex);
      slot.classList.toggle('hidden', index < start || index >= start + visible);
    });
    carousel.querySelectorAll('[data-carousel-step]').forEach((button) => {
      button.disabled = Number(button.dataset.carouselStep) < 0 ? start === 0 : start === max;
    });
    carousel.querySelectorAll('[data-carousel-dot]').forEach((dot) => {
      const active = Number(dot.dataset.carouselDot) === start;
      dot.classList.toggle('bg-blue-500', active);
      dot.classList.toggle('bg-gray-600', !active);
    });
  }

  document.addEventListener('click', (event) => {
    const target = event.target;
    if (!(target instanceof Element) || !modal) return;

    const open = target.closest('[data-open-job]');
    if (open) return openJob(open.dataset.openJob);

    const pick = target.closest('[data-select-job]');
    if (pick) return selectJob(pick.dataset.selectJob, pick);

    if (target.closest('[data-modal-close]') || target.matches('[data-modal-backdrop]')) {
      return closeModal();
    }

    const stepButton = target.closest('[data-carousel-step]');
    if (stepButton) {
      const carousel = stepButton.closest('[data-carousel]');
      return setIndex(carousel, Number(carousel.dataset.index) + Number(stepButton.dataset.carouselStep));
    }

    const dot = target.closest('[data-carousel-dot]');
    if (dot) return setIndex(dot.closest('[data-carousel]'), Number(dot.dataset.carouselDot));

    if (target.closest('[data-see-more]')) showLoading();
  });

  document.addEventListener('keydown', (event) => {
    if (event.key === 'Escape' && modal && !modal.classList.contains('hidden')) {
      closeModal();
    }
  });
})();
</script>
"#;

fn millis(delay: Duration) -> String {
    delay.as_millis().to_string()
}

/// JSON literal safe to embed inside a `<script>` element.
fn script_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/")
}

pub fn render_page_script() -> String {
    PAGE_SCRIPT
        .replace("__TYPE_MS__", &millis(TYPE_DELAY))
        .replace("__DELETE_MS__", &millis(DELETE_DELAY))
        .replace("__PAUSE_MS__", &millis(FULL_TEXT_PAUSE))
        .replace("__NEXT_MS__", &millis(NEXT_EXAMPLE_DELAY))
        .replace("__EXAMPLES__", &script_json(&EXAMPLE_QUERIES))
        .replace("__STATIC_PLACEHOLDER__", &script_json(STATIC_PLACEHOLDER))
}
